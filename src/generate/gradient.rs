//! Colour gradient rectangle.

use crate::config::Configuration;
use crate::error::Result;
use crate::types::{Colour, PixelBuffer};

use super::{read_image_size, zero_error, Generator, IMAGE_SECTION};

/// Parameters for the gradient rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRectangleParams {
    width: u32,
    height: u32,
}

impl ColorRectangleParams {
    /// Create parameters; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 {
            return Err(zero_error(IMAGE_SECTION, "width"));
        }
        if height == 0 {
            return Err(zero_error(IMAGE_SECTION, "height"));
        }
        Ok(Self { width, height })
    }

    /// Read parameters from `[ImageProperties]`.
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let (width, height) = read_image_size(config)?;
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Render the gradient.
///
/// Red ramps with x, green with y. Blue is `(x + y) * 255 / width` wrapped
/// at 255, so it divides by the width for both terms.
pub fn color_rectangle(params: &ColorRectangleParams) -> Result<PixelBuffer> {
    let width = u64::from(params.width);
    let height = u64::from(params.height);

    PixelBuffer::try_from_fn(params.width, params.height, |x, y| {
        let (x, y) = (u64::from(x), u64::from(y));
        Colour::rgb(
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) * 255 / width % 255) as u8,
        )
    })
}

/// Generator for `IntroColorRectangle`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorRectangle;

impl Generator for ColorRectangle {
    fn tag(&self) -> &'static str {
        "IntroColorRectangle"
    }

    fn description(&self) -> &'static str {
        "Red/green gradient rectangle with a diagonal blue ramp"
    }

    fn keys(&self) -> &'static [&'static str] {
        &["ImageProperties.width", "ImageProperties.height"]
    }

    fn validate(&self, config: &Configuration) -> Result<()> {
        ColorRectangleParams::from_config(config).map(|_| ())
    }

    fn generate(&self, config: &Configuration) -> Result<PixelBuffer> {
        let params = ColorRectangleParams::from_config(config)?;
        color_rectangle(&params)
    }
}
