use miette::Diagnostic;
use thiserror::Error;

/// Main error type for patgen operations
#[derive(Error, Diagnostic, Debug)]
pub enum PatgenError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(patgen::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    #[diagnostic(code(patgen::parse))]
    Parse {
        location: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Missing parameter: {key}")]
    #[diagnostic(code(patgen::param::missing))]
    MissingParameter {
        key: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid parameter {key}: {message}")]
    #[diagnostic(code(patgen::param::invalid))]
    InvalidParameter {
        key: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to write {path}: {message}")]
    #[diagnostic(code(patgen::write))]
    Write {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Insufficient memory for a {width}x{height} image")]
    #[diagnostic(
        code(patgen::alloc),
        help("Run on a machine with more memory or reduce the image size")
    )]
    Allocation { width: u32, height: u32 },
}

impl PatgenError {
    /// Whether this error must abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PatgenError::Allocation { .. })
    }
}

pub type Result<T> = std::result::Result<T, PatgenError>;
