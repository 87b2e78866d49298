//! Rendering module for patgen.
//!
//! Encodes generated pixel buffers as bitmap files.

mod bmp;

pub use bmp::{output_path, read_bmp, write_bmp, IMAGE_EXTENSION};
