//! Compiler error types

use litmap_core::CoreError;
use litmap_parser::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Compiler error
///
/// Every variant describes bad filter input; none of them is fatal to the
/// caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The filter text could not be parsed
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// Neither a built-in attribute nor a review field of the mapping
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// `__suffix` that is not a known lookup
    #[error("Unsupported modifier '{modifier}' on field '{field}'")]
    UnsupportedModifier { field: String, modifier: String },

    /// Known lookup that the field's type cannot evaluate
    #[error("Comparison '{lookup}' is not supported for field '{field}'")]
    UnsupportedComparison { field: String, lookup: String },

    /// Value that cannot be read as the field's type
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Condition key that cannot be split into field and modifier
    #[error("Malformed condition: {0}")]
    Malformed(String),
}

impl CompileError {
    /// Coarse category of this error
    pub fn kind(&self) -> FilterErrorKind {
        match self {
            CompileError::Syntax(_) => FilterErrorKind::Syntax,
            CompileError::UnknownField(_) => FilterErrorKind::UnknownField,
            CompileError::UnsupportedModifier { .. }
            | CompileError::UnsupportedComparison { .. } => {
                FilterErrorKind::UnsupportedComparison
            }
            CompileError::InvalidValue { .. } => FilterErrorKind::InvalidValue,
            CompileError::Malformed(_) => FilterErrorKind::Malformed,
        }
    }

    /// Attach a field name to a core value error
    pub(crate) fn from_core(field: &str, error: CoreError) -> Self {
        match error {
            CoreError::UnsupportedLookup { lookup, .. } => CompileError::UnsupportedComparison {
                field: field.to_string(),
                lookup,
            },
            other => CompileError::InvalidValue {
                field: field.to_string(),
                reason: match other {
                    CoreError::InvalidValue(reason) => reason,
                    rest => rest.to_string(),
                },
            },
        }
    }
}

/// Category of a filter error, as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterErrorKind {
    Syntax,
    UnknownField,
    UnsupportedComparison,
    InvalidValue,
    Malformed,
}

impl FilterErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterErrorKind::Syntax => "syntax",
            FilterErrorKind::UnknownField => "unknown_field",
            FilterErrorKind::UnsupportedComparison => "unsupported_comparison",
            FilterErrorKind::InvalidValue => "invalid_value",
            FilterErrorKind::Malformed => "malformed",
        }
    }
}

impl fmt::Display for FilterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
