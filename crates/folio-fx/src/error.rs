#![forbid(unsafe_code)]

//! Error type shared by the effect units.

use std::fmt;

use crate::theme::StorageError;

/// Errors raised while constructing or configuring effect units.
///
/// Effects never fail once running; everything here surfaces at construction
/// or configuration time.
#[derive(Debug)]
pub enum FxError {
    /// A `data-animate` value that names no known reveal animation.
    UnknownRevealKind(String),
    /// A data attribute whose value cannot be interpreted.
    InvalidAttribute { name: String, value: String },
    /// Malformed or out-of-range configuration.
    Config(String),
    /// The theme flag could not be read or written.
    Storage(StorageError),
}

impl FxError {
    pub fn invalid_attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxError::UnknownRevealKind(name) => write!(f, "unknown reveal animation: {name:?}"),
            FxError::InvalidAttribute { name, value } => {
                write!(f, "invalid value {value:?} for attribute {name}")
            }
            FxError::Config(msg) => write!(f, "configuration error: {msg}"),
            FxError::Storage(e) => write!(f, "theme storage: {e}"),
        }
    }
}

impl std::error::Error for FxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FxError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for FxError {
    fn from(e: StorageError) -> Self {
        FxError::Storage(e)
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        FxError::Config(e.to_string())
    }
}

/// Result alias for effect construction.
pub type FxResult<T> = Result<T, FxError>;
