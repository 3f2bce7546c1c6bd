//! Error types for the mf2query library
//!
//! Every failure in the query layer is a local precondition violation: asking a
//! value for a shape it does not have, or forwarding an accessor on an empty
//! result list. The I/O layer adds the usual file and serialization errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The structural shape of a property value, used in mismatch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A bare string
    Plain,
    /// A `{value, html}` pair
    RichText,
    /// A nested microformat item
    Microformat,
    /// Any other JSON value, kept verbatim
    Other,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain string"),
            Self::RichText => write!(f, "rich text"),
            Self::Microformat => write!(f, "microformat"),
            Self::Other => write!(f, "other value"),
        }
    }
}

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum Mf2Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An accessor was called on a value of the wrong shape
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Shape, found: Shape },

    /// `value()` on a microformat that carries no `value` field
    #[error("Microformat {types:?} has no value")]
    MissingValue { types: Vec<String> },

    /// A forwarding accessor was called on an empty result list
    #[error("Empty result: cannot call {operation}() on an empty list")]
    EmptyResult { operation: String },

    /// The parsed document violates the mf2 JSON shape
    #[error("Invalid document at {location}: {reason}")]
    InvalidDocument { location: String, reason: String },

    /// JSONPath query errors
    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path resolution errors
    #[error("Path resolution error: {reason}")]
    PathResolution { reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Mf2Error>;

impl Mf2Error {
    /// Create a new type mismatch error
    pub fn type_mismatch(expected: Shape, found: Shape) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Create a new missing value error
    pub fn missing_value(types: &[String]) -> Self {
        Self::MissingValue {
            types: types.to_vec(),
        }
    }

    /// Create a new empty result error
    pub fn empty_result(operation: impl Into<String>) -> Self {
        Self::EmptyResult {
            operation: operation.into(),
        }
    }

    /// Create a new invalid document error
    pub fn invalid_document(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new path resolution error
    pub fn path_resolution(reason: impl Into<String>) -> Self {
        Self::PathResolution {
            reason: reason.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the caller can sensibly continue with other inputs
    ///
    /// Shape and emptiness errors are properties of one query over one
    /// document; a batch over many files can skip the offender and go on.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            Self::FileNotFound { .. } | Self::Regex(_) | Self::InvalidQuery { .. } => false,
            Self::Json(_)
            | Self::Yaml(_)
            | Self::TypeMismatch { .. }
            | Self::MissingValue { .. }
            | Self::EmptyResult { .. }
            | Self::InvalidDocument { .. }
            | Self::PathResolution { .. }
            | Self::Validation { .. } => true,
        }
    }
}
