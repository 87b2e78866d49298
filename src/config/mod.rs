//! Configuration trees for pattern definitions.
//!
//! A configuration is a two-level tree: named sections holding typed
//! key/value pairs. Files are read from INI (the default) or YAML.
//!
//! # Usage
//!
//! ```ignore
//! use patgen::config::Configuration;
//!
//! let config = Configuration::load("patterns/blocks.ini")?;
//! let width = config.get_int("ImageProperties", "width")?;
//! ```
//!
//! Typed accessors never panic: an absent key is reported as
//! [`PatgenError::MissingParameter`] and a value of the wrong type as
//! [`PatgenError::InvalidParameter`], both naming the `Section.key`.

mod ini;
mod location;
mod yaml;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PatgenError, Result};

pub use ini::parse_ini;
pub use location::{offset_to_location, Location};
pub use yaml::parse_yaml;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Fixed-length tuple of numbers, e.g. `(1.0, 0.5, 0.0)`.
    Tuple(Vec<f64>),
}

impl Value {
    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Keys of one section.
pub type Section = BTreeMap<String, Value>;

/// A parsed configuration file: section -> key -> value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    sections: BTreeMap<String, Section>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ini,
    Yaml,
}

impl Format {
    /// Pick a format from a file extension. Anything that is not YAML is INI.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Ini,
        }
    }
}

impl Configuration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| PatgenError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

        match Format::from_path(path) {
            Format::Ini => parse_ini(&source),
            Format::Yaml => parse_yaml(&source),
        }
    }

    /// Whether the configuration has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Add an empty section. Returns `false` if it already exists.
    pub fn add_section(&mut self, name: &str) -> bool {
        if self.sections.contains_key(name) {
            return false;
        }
        self.sections.insert(name.to_string(), Section::new());
        true
    }

    /// Set a value, creating the section if needed. Returns the previous value.
    pub fn insert(&mut self, section: &str, key: &str, value: Value) -> Option<Value> {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value)
    }

    /// Iterate over sections in name order.
    #[cfg(test)]
    pub(crate) fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, keys)| (name.as_str(), keys))
    }

    /// Get a raw value.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Get a required value of any type.
    pub fn require(&self, section: &str, key: &str) -> Result<&Value> {
        self.get(section, key)
            .ok_or_else(|| PatgenError::MissingParameter {
                key: key_name(section, key),
                help: Some(format!("Add `{}` to the [{}] section", key, section)),
            })
    }

    /// Get a required string value.
    pub fn get_string(&self, section: &str, key: &str) -> Result<&str> {
        match self.require(section, key)? {
            Value::String(s) => Ok(s),
            other => Err(mistyped(section, key, "string", other)),
        }
    }

    /// Get a required integer value. Doubles are rejected.
    pub fn get_int(&self, section: &str, key: &str) -> Result<i64> {
        match self.require(section, key)? {
            Value::Int(n) => Ok(*n),
            other => Err(mistyped(section, key, "integer", other)),
        }
    }

    /// Get a required double value. Integers are widened.
    pub fn get_double(&self, section: &str, key: &str) -> Result<f64> {
        match self.require(section, key)? {
            Value::Double(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            other => Err(mistyped(section, key, "double", other)),
        }
    }

    /// Get a required boolean value.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool> {
        match self.require(section, key)? {
            Value::Bool(b) => Ok(*b),
            other => Err(mistyped(section, key, "boolean", other)),
        }
    }

    /// Get a required tuple of doubles.
    pub fn get_double_tuple(&self, section: &str, key: &str) -> Result<&[f64]> {
        match self.require(section, key)? {
            Value::Tuple(items) => Ok(items),
            other => Err(mistyped(section, key, "tuple", other)),
        }
    }
}

/// Format a `Section.key` name for diagnostics.
pub fn key_name(section: &str, key: &str) -> String {
    format!("{}.{}", section, key)
}

fn mistyped(section: &str, key: &str, expected: &str, found: &Value) -> PatgenError {
    PatgenError::InvalidParameter {
        key: key_name(section, key),
        message: format!("expected {}, found {} {}", expected, found.type_name(), found),
        help: None,
    }
}
