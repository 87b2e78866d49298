//! Core domain types for patgen.
//!
//! - `Colour` - RGB colour values
//! - `PixelBuffer` - Row-major grid of colours produced by a generator

mod buffer;
mod colour;

pub use buffer::PixelBuffer;
pub use colour::Colour;
