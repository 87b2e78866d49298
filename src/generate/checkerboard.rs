//! Checkerboard blocks.
//!
//! The image is divided into `nrXBlocks` x `nrYBlocks` tiles of
//! `width / nrXBlocks` by `height / nrYBlocks` pixels. Tiles alternate
//! between the white and black colour; when the dimensions do not divide
//! evenly, the trailing partial tiles continue the same pattern.

use crate::config::{key_name, Configuration};
use crate::error::{PatgenError, Result};
use crate::types::{Colour, PixelBuffer};

use super::{read_image_size, read_positive, zero_error, Generator, BLOCK_SECTION, IMAGE_SECTION};

/// Parameters for the checkerboard.
///
/// Construction guarantees that each block is at least one pixel wide and
/// tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlocksParams {
    width: u32,
    height: u32,
    white: Colour,
    black: Colour,
    x_blocks: u32,
    y_blocks: u32,
    invert: bool,
}

impl BlocksParams {
    /// Create parameters with the default black and white colours.
    pub fn new(width: u32, height: u32, x_blocks: u32, y_blocks: u32) -> Result<Self> {
        if width == 0 {
            return Err(zero_error(IMAGE_SECTION, "width"));
        }
        if height == 0 {
            return Err(zero_error(IMAGE_SECTION, "height"));
        }
        check_count(x_blocks, width, "nrXBlocks", "width")?;
        check_count(y_blocks, height, "nrYBlocks", "height")?;

        Ok(Self {
            width,
            height,
            white: Colour::WHITE,
            black: Colour::BLACK,
            x_blocks,
            y_blocks,
            invert: false,
        })
    }

    /// Set the two block colours.
    pub fn with_colours(mut self, white: Colour, black: Colour) -> Self {
        self.white = white;
        self.black = black;
        self
    }

    /// Swap which colour the even blocks receive.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Read parameters from `[ImageProperties]` and `[BlockProperties]`.
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let (width, height) = read_image_size(config)?;
        let white = read_colour(config, "colorWhite")?;
        let black = read_colour(config, "colorBlack")?;
        let x_blocks = read_positive(config, BLOCK_SECTION, "nrXBlocks")?;
        let y_blocks = read_positive(config, BLOCK_SECTION, "nrYBlocks")?;
        let invert = config.get_bool(BLOCK_SECTION, "invertColors")?;

        Ok(Self::new(width, height, x_blocks, y_blocks)?
            .with_colours(white, black)
            .inverted(invert))
    }

    /// Block size in pixels as (width, height).
    pub fn block_size(&self) -> (u32, u32) {
        (self.width / self.x_blocks, self.height / self.y_blocks)
    }

    /// Colour of the block at the given block coordinates.
    pub fn block_colour(&self, block_x: u32, block_y: u32) -> Colour {
        let even = (u64::from(block_x) + u64::from(block_y)) % 2 == 0;
        if even != self.invert {
            self.white
        } else {
            self.black
        }
    }
}

/// Render the checkerboard.
pub fn blocks(params: &BlocksParams) -> Result<PixelBuffer> {
    let (block_width, block_height) = params.block_size();

    PixelBuffer::try_from_fn(params.width, params.height, |x, y| {
        params.block_colour(x / block_width, y / block_height)
    })
}

/// Generator for `IntroBlocks`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blocks;

impl Generator for Blocks {
    fn tag(&self) -> &'static str {
        "IntroBlocks"
    }

    fn description(&self) -> &'static str {
        "Two-colour checkerboard of nrXBlocks x nrYBlocks tiles"
    }

    fn keys(&self) -> &'static [&'static str] {
        &[
            "ImageProperties.width",
            "ImageProperties.height",
            "BlockProperties.colorWhite",
            "BlockProperties.colorBlack",
            "BlockProperties.nrXBlocks",
            "BlockProperties.nrYBlocks",
            "BlockProperties.invertColors",
        ]
    }

    fn validate(&self, config: &Configuration) -> Result<()> {
        BlocksParams::from_config(config).map(|_| ())
    }

    fn generate(&self, config: &Configuration) -> Result<PixelBuffer> {
        let params = BlocksParams::from_config(config)?;
        blocks(&params)
    }
}

/// A block count must be non-zero and no larger than the dimension it
/// divides, otherwise blocks would be zero pixels across.
fn check_count(count: u32, dimension: u32, key: &str, dimension_name: &str) -> Result<()> {
    if count == 0 {
        return Err(zero_error(BLOCK_SECTION, key));
    }
    if count > dimension {
        return Err(PatgenError::InvalidParameter {
            key: key_name(BLOCK_SECTION, key),
            message: format!(
                "{} blocks do not fit in an image {} of {} pixels",
                count, dimension_name, dimension
            ),
            help: Some(format!("Use at most {} blocks", dimension)),
        });
    }
    Ok(())
}

fn read_colour(config: &Configuration, key: &str) -> Result<Colour> {
    let components = config.get_double_tuple(BLOCK_SECTION, key)?;
    Colour::from_unit(components, &key_name(BLOCK_SECTION, key))
}
