use std::path::PathBuf;

use thiserror::Error;

use crate::state::form::FormId;

/// Setup errors raised when a form is used outside of its lifetime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("no active form registered under '{0}'")]
    NoActiveForm(FormId),

    #[error("form '{0}' is already registered")]
    AlreadyRegistered(FormId),
}

/// Failures reported by a field validator.
///
/// Triggers never propagate these; they are logged and the form stays on the
/// current step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("validation rejected: {0}")]
    Rejected(String),

    #[error("validator unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML form definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON form definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read form definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("field '{field}' has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("form definition declares no steps")]
    NoSteps,

    #[error("unsupported form definition format: {0}")]
    UnsupportedFormat(PathBuf),
}
