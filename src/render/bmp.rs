//! BMP output for generated images.
//!
//! Images are written as uncompressed 24-bit bitmaps, so reading a file back
//! reproduces the buffer exactly.

use std::path::{Path, PathBuf};

use image::{ExtendedColorType, ImageFormat};

use crate::error::{PatgenError, Result};
use crate::types::{Colour, PixelBuffer};

/// Extension given to every generated image.
pub const IMAGE_EXTENSION: &str = "bmp";

/// Write a buffer to a BMP file.
///
/// Empty buffers have nothing to encode and are rejected.
pub fn write_bmp(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    if buffer.is_empty() {
        return Err(PatgenError::Write {
            path: path.to_path_buf(),
            message: "Cannot write an empty image".to_string(),
        });
    }

    let bytes = buffer.to_rgb_bytes()?;

    image::save_buffer_with_format(
        path,
        &bytes,
        buffer.width(),
        buffer.height(),
        ExtendedColorType::Rgb8,
        ImageFormat::Bmp,
    )
    .map_err(|e| PatgenError::Write {
        path: path.to_path_buf(),
        message: format!("Failed to write BMP: {}", e),
    })
}

/// Read a BMP (or any image format the decoder recognises) into a buffer.
pub fn read_bmp(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| PatgenError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgb8();

    PixelBuffer::try_from_fn(img.width(), img.height(), |x, y| {
        Colour::from(img.get_pixel(x, y).0)
    })
}

/// Output path for a configuration file: the extension is replaced with
/// `.bmp`, or `.bmp` is appended when there is none.
///
/// When `output_dir` is given, the file name is placed there instead of
/// beside the input.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let renamed = input.with_extension(IMAGE_EXTENSION);
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{blocks, color_rectangle, BlocksParams, ColorRectangleParams};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_write_bmp_simple() {
        let mut buffer = PixelBuffer::try_new(2, 2, Colour::BLACK).unwrap();
        buffer.set(1, 0, Colour::WHITE);

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bmp");

        write_bmp(&buffer, &path).unwrap();

        assert!(path.exists());

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_gradient_survives_round_trip() {
        // Odd width exercises BMP row padding.
        let buffer = color_rectangle(&ColorRectangleParams::new(13, 7).unwrap()).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("gradient.bmp");
        write_bmp(&buffer, &path).unwrap();

        assert_eq!(read_bmp(&path).unwrap(), buffer);
    }

    #[test]
    fn test_blocks_survive_round_trip() {
        let params = BlocksParams::new(20, 10, 4, 2)
            .unwrap()
            .with_colours(Colour::rgb(255, 127, 0), Colour::rgb(0, 63, 191));
        let buffer = blocks(&params).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("blocks.bmp");
        write_bmp(&buffer, &path).unwrap();

        assert_eq!(read_bmp(&path).unwrap(), buffer);
    }

    #[test]
    fn test_write_empty_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.bmp");

        let err = write_bmp(&PixelBuffer::empty(), &path).unwrap_err();

        assert!(matches!(err, PatgenError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.bmp");
        let buffer = PixelBuffer::try_new(1, 1, Colour::WHITE).unwrap();

        let err = write_bmp(&buffer, &path).unwrap_err();

        assert!(matches!(err, PatgenError::Write { .. }));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("a/rect.ini"), None), PathBuf::from("a/rect.bmp"));
        assert_eq!(output_path(Path::new("a/rect"), None), PathBuf::from("a/rect.bmp"));
        assert_eq!(output_path(Path::new("a.b/rect.v2.ini"), None), PathBuf::from("a.b/rect.v2.bmp"));
        assert_eq!(
            output_path(Path::new("a/rect.yaml"), Some(Path::new("out"))),
            PathBuf::from("out/rect.bmp")
        );
    }
}
