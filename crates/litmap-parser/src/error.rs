//! Parser error types

use thiserror::Error;

/// Parser error
///
/// Every variant is a syntax error in the filter text. The paren variants
/// are structural: the text could not even be split into terms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `)` without a matching `(`
    #[error("Unbalanced ')' at position {position}")]
    UnbalancedParen { position: usize },

    /// Input ended with groups still open
    #[error("{open} unclosed '(' at end of filter")]
    UnclosedParen { open: usize },

    /// A condition that cannot be split into field and value
    #[error("Malformed condition '{0}'")]
    MalformedLeaf(String),

    /// Operator without the operand it needs
    #[error("Missing operand: {0}")]
    MissingOperand(String),

    /// Two operands next to each other without an operator
    #[error("Missing operator: {0}")]
    MissingOperator(String),

    /// Literal text outside any condition
    #[error("Unexpected text '{0}' outside a condition")]
    UnexpectedText(String),
}

impl ParseError {
    /// Returns true for paren mismatches
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ParseError::UnbalancedParen { .. } | ParseError::UnclosedParen { .. }
        )
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
