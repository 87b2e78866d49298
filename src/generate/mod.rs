//! Pattern generators and the dispatcher that selects between them.
//!
//! Each configuration names its pattern in `General.type`. The
//! [`Dispatcher`] maps that tag to a registered [`Generator`], which reads
//! and validates its own parameters before filling a [`PixelBuffer`].
//!
//! Unrecognised tags are not an error: they produce an empty (0x0) buffer,
//! which callers treat as "no image".

mod checkerboard;
mod gradient;

use std::collections::HashMap;

use log::debug;

use crate::config::{key_name, Configuration};
use crate::error::{PatgenError, Result};
use crate::types::PixelBuffer;

pub use checkerboard::{blocks, Blocks, BlocksParams};
pub use gradient::{color_rectangle, ColorRectangle, ColorRectangleParams};

/// Section holding the pattern type tag.
pub const GENERAL_SECTION: &str = "General";

/// Section holding the image dimensions.
pub const IMAGE_SECTION: &str = "ImageProperties";

/// Section holding checkerboard parameters.
pub const BLOCK_SECTION: &str = "BlockProperties";

/// A pixel-generation algorithm selectable by a type tag.
pub trait Generator {
    /// The `General.type` value this generator answers to.
    fn tag(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Configuration keys read by this generator, as `Section.key`.
    fn keys(&self) -> &'static [&'static str];

    /// Read and validate parameters without generating any pixels.
    fn validate(&self, config: &Configuration) -> Result<()>;

    /// Read parameters and generate the image.
    fn generate(&self, config: &Configuration) -> Result<PixelBuffer>;
}

/// Registry of generators keyed by type tag.
pub struct Dispatcher {
    generators: HashMap<&'static str, Box<dyn Generator>>,
}

impl Dispatcher {
    /// Create a dispatcher with no generators.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Create a dispatcher with every builtin generator registered.
    pub fn builtin() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(ColorRectangle);
        dispatcher.register(Blocks);
        dispatcher
    }

    /// Register a generator, replacing any previous one with the same tag.
    pub fn register(&mut self, generator: impl Generator + 'static) -> Option<Box<dyn Generator>> {
        self.generators.insert(generator.tag(), Box::new(generator))
    }

    /// Look up a generator by tag.
    pub fn get(&self, tag: &str) -> Option<&dyn Generator> {
        self.generators.get(tag).map(|g| g.as_ref())
    }

    /// All registered generators, sorted by tag.
    pub fn generators(&self) -> Vec<&dyn Generator> {
        let mut all: Vec<&dyn Generator> = self.generators.values().map(|g| g.as_ref()).collect();
        all.sort_by_key(|g| g.tag());
        all
    }

    /// Validate a configuration without generating.
    ///
    /// Returns the matched tag, or `None` when the type is not registered.
    pub fn validate(&self, config: &Configuration) -> Result<Option<&'static str>> {
        let tag = pattern_type(config)?;
        match self.get(tag) {
            Some(generator) => {
                generator.validate(config)?;
                Ok(Some(generator.tag()))
            }
            None => Ok(None),
        }
    }

    /// Generate the image described by a configuration.
    ///
    /// An unrecognised `General.type` yields an empty buffer.
    pub fn generate(&self, config: &Configuration) -> Result<PixelBuffer> {
        let tag = pattern_type(config)?;
        match self.get(tag) {
            Some(generator) => {
                debug!("Dispatching pattern type {} to generator", tag);
                generator.generate(config)
            }
            None => {
                debug!("No generator registered for pattern type {}", tag);
                Ok(PixelBuffer::empty())
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Generate an image using the builtin generators.
pub fn generate_image(config: &Configuration) -> Result<PixelBuffer> {
    Dispatcher::builtin().generate(config)
}

/// Read the required `General.type` tag.
pub fn pattern_type(config: &Configuration) -> Result<&str> {
    config.get_string(GENERAL_SECTION, "type")
}

/// Read a strictly positive integer that must fit in `u32`.
pub(crate) fn read_positive(config: &Configuration, section: &str, key: &str) -> Result<u32> {
    let value = config.get_int(section, key)?;
    if value <= 0 {
        return Err(PatgenError::InvalidParameter {
            key: key_name(section, key),
            message: format!("must be greater than 0, found {}", value),
            help: None,
        });
    }
    u32::try_from(value).map_err(|_| PatgenError::InvalidParameter {
        key: key_name(section, key),
        message: format!("{} is too large (maximum {})", value, u32::MAX),
        help: None,
    })
}

/// Read `ImageProperties.width` and `ImageProperties.height`.
pub(crate) fn read_image_size(config: &Configuration) -> Result<(u32, u32)> {
    let width = read_positive(config, IMAGE_SECTION, "width")?;
    let height = read_positive(config, IMAGE_SECTION, "height")?;
    Ok((width, height))
}

/// Error for a dimension or count that must be non-zero.
pub(crate) fn zero_error(section: &str, key: &str) -> PatgenError {
    PatgenError::InvalidParameter {
        key: key_name(section, key),
        message: "must be greater than 0".to_string(),
        help: None,
    }
}
