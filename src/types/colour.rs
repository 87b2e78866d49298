//! Colour type and conversions.

use std::fmt;

use crate::error::{PatgenError, Result};

/// An RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a colour from unit-range components (each in `[0, 1]`).
    ///
    /// Components are scaled by 255 and truncated, so `0.5` becomes `127`.
    /// `key` names the configuration entry the components came from and is
    /// used for error reporting.
    pub fn from_unit(components: &[f64], key: &str) -> Result<Self> {
        let [r, g, b] = components else {
            return Err(PatgenError::InvalidParameter {
                key: key.to_string(),
                message: format!("expected 3 colour components, found {}", components.len()),
                help: Some("Write colours as (red, green, blue), e.g. (1.0, 0.5, 0.0)".to_string()),
            });
        };

        Ok(Self::rgb(
            unit_channel(*r, key)?,
            unit_channel(*g, key)?,
            unit_channel(*b, key)?,
        ))
    }

    /// Convert to an RGB array.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Scale a single `[0, 1]` component to a channel value.
fn unit_channel(value: f64, key: &str) -> Result<u8> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PatgenError::InvalidParameter {
            key: key.to_string(),
            message: format!("colour component {} is outside [0, 1]", value),
            help: None,
        });
    }
    // In range, so the truncating cast cannot saturate.
    Ok((value * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unit_scales_and_truncates() {
        let c = Colour::from_unit(&[1.0, 0.5, 0.0], "BlockProperties.colorWhite").unwrap();
        assert_eq!(c, Colour::rgb(255, 127, 0));

        let c = Colour::from_unit(&[0.999, 0.1, 0.2], "k").unwrap();
        assert_eq!(c, Colour::rgb(254, 25, 51));
    }

    #[test]
    fn test_from_unit_wrong_arity() {
        let err = Colour::from_unit(&[1.0, 1.0], "BlockProperties.colorBlack").unwrap_err();
        assert!(matches!(err, PatgenError::InvalidParameter { ref key, .. } if key == "BlockProperties.colorBlack"));
        assert!(Colour::from_unit(&[0.0, 0.0, 0.0, 0.0], "k").is_err());
    }

    #[test]
    fn test_from_unit_out_of_range() {
        assert!(Colour::from_unit(&[1.5, 0.0, 0.0], "k").is_err());
        assert!(Colour::from_unit(&[0.0, -0.1, 0.0], "k").is_err());
        assert!(Colour::from_unit(&[0.0, 0.0, f64::NAN], "k").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 16)), "#FF0010");
    }

    #[test]
    fn test_constants() {
        assert_eq!(Colour::BLACK.to_rgb(), [0, 0, 0]);
        assert_eq!(Colour::from([255, 255, 255]), Colour::WHITE);
    }
}
