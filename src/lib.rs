//! patgen - Test-pattern bitmap generator
//!
//! A library for turning declarative configuration files into procedurally
//! generated images (gradients, checkerboards) and writing them as bitmaps.

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod render;
pub mod types;

pub use config::{Configuration, Value};
pub use error::{PatgenError, Result};
pub use generate::{
    blocks, color_rectangle, generate_image, Blocks, BlocksParams, ColorRectangle,
    ColorRectangleParams, Dispatcher, Generator,
};
pub use render::{output_path, read_bmp, write_bmp};
pub use types::{Colour, PixelBuffer};
