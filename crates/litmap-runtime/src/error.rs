//! Runtime error types

use litmap_compiler::CompileError;
use litmap_core::model::{FieldId, ListId, MappingId, PublicationId};
use litmap_core::CoreError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// List not found
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    /// Publication not found
    #[error("Publication not found: {0}")]
    PublicationNotFound(PublicationId),

    /// Review field not found
    #[error("Review field not found: {0}")]
    FieldNotFound(FieldId),

    /// Mapping not found
    #[error("Mapping not found: {0}")]
    MappingNotFound(MappingId),

    /// Review field name already taken within the mapping
    #[error("A review field named '{name}' already exists in mapping {mapping}")]
    DuplicateName { mapping: MappingId, name: String },

    /// Value of the wrong storage type for a field
    #[error("Field '{field}' stores {expected} values, got {actual}")]
    ValueTypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Invalid value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Unknown ordering key
    #[error("Cannot order publications by '{0}'")]
    InvalidOrder(String),

    /// Filter text that does not compile
    #[error(transparent)]
    Filter(#[from] CompileError),
}

impl From<CoreError> for RuntimeError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidValue(reason) => RuntimeError::InvalidValue(reason),
            other => RuntimeError::InvalidValue(other.to_string()),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
