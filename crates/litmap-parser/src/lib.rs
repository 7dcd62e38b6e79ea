//! litmap Parser - filter text to AST parser
//!
//! This crate turns user-supplied filter text such as
//! `(year=2020) and not (title__icontains=survey)` into a token tree
//! and then into a `FilterExpr` AST.

pub mod error;
pub mod expression_parser;
pub mod tokenizer;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use expression_parser::FilterParser;
pub use tokenizer::tokenize;
