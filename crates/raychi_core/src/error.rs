//! Configuration errors.
//!
//! Every variant is fatal: it is reported before any rendering work starts
//! and no partial image is produced.

use thiserror::Error;

/// Errors that can occur while loading or validating a render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene must contain at least 1 object")]
    EmptyScene,

    #[error("Unknown object type {value} in object {index}")]
    UnknownObjectType { index: usize, value: i64 },

    #[error("Unknown material {value} in object {index}")]
    UnknownMaterial { index: usize, value: i64 },

    #[error("Object {index} missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("'{0}' missing in configuration")]
    MissingParameter(&'static str),

    #[error("{name} must be a 3-element vector (got {len} components)")]
    InvalidVector { name: String, len: usize },

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Camera up vector is parallel to the view direction")]
    DegenerateCamera,
}

impl ConfigError {
    pub(crate) fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
