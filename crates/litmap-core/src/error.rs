//! Error types for litmap Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown review field type: {0}")]
    UnknownFieldType(String),

    #[error("Unknown venue type: {0}")]
    UnknownVenueType(String),

    #[error("Unknown list kind: {0}")]
    UnknownListKind(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Lookup '{lookup}' is not supported for {target} values")]
    UnsupportedLookup { target: String, lookup: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
