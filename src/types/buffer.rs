//! Pixel buffer - a fixed-size grid of colours.

use crate::error::{PatgenError, Result};

use super::Colour;

/// A generated image - a row-major grid of RGB colours.
///
/// A buffer with zero width and height is the "no image" value returned for
/// unrecognised pattern types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    /// Pixel data (row-major: index = y * width + x).
    pixels: Vec<Colour>,

    /// Width in pixels.
    width: u32,

    /// Height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Allocate a buffer filled with a single colour.
    ///
    /// Returns [`PatgenError::Allocation`] when the pixel storage cannot be
    /// reserved, including when the pixel count overflows the address space.
    pub fn try_new(width: u32, height: u32, fill: Colour) -> Result<Self> {
        let alloc_error = || PatgenError::Allocation { width, height };

        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(alloc_error)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_error())?;
        pixels.resize(len, fill);

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// The empty "no image" buffer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fill a new buffer by evaluating `f(x, y)` for every pixel.
    pub fn try_from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Colour) -> Result<Self> {
        let mut buffer = Self::try_new(width, height, Colour::BLACK)?;
        for y in 0..height {
            for x in 0..width {
                let index = buffer.index(x, y);
                buffer.pixels[index] = f(x, y);
            }
        }
        Ok(buffer)
    }

    /// Get the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether this buffer holds no image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set a pixel. Out-of-bounds writes are ignored and return `false`.
    #[cfg(test)]
    pub(crate) fn set(&mut self, x: u32, y: u32, colour: Colour) -> bool {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = colour;
            true
        } else {
            false
        }
    }

    /// Get the pixels in row-major order.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Iterate over rows, top to bottom.
    #[cfg(test)]
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Colour]> {
        // chunks() panics on zero, and an empty buffer has no rows anyway.
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Convert to a packed RGB byte buffer (for image output).
    pub fn to_rgb_bytes(&self) -> Result<Vec<u8>> {
        let alloc_error = || PatgenError::Allocation {
            width: self.width,
            height: self.height,
        };

        let len = self.pixels.len().checked_mul(3).ok_or_else(alloc_error)?;
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len).map_err(|_| alloc_error())?;
        for colour in &self.pixels {
            bytes.extend_from_slice(&colour.to_rgb());
        }
        Ok(bytes)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
