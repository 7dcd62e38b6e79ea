//! Filter syntax definitions for litmap
//!
//! This module contains:
//! - The raw token tree produced by scanning filter text
//! - The filter expression AST the token tree reduces to
//! - Logical keywords and lookup modifiers

pub mod expression;
pub mod operator;
pub mod token;

pub use expression::FilterExpr;
pub use operator::{Keyword, Lookup};
pub use token::Token;
