//! litmap Compiler - filter AST to predicate compiler
//!
//! This crate resolves the conditions of a parsed filter against a
//! `FilterScope` (built-in publication attributes plus the review fields
//! of one mapping) and produces an executable `Predicate`.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod predicate;
pub mod scope;

// Re-export main types
pub use compiler::{compile, compile_filter};
pub use error::{CompileError, FilterErrorKind, Result};
pub use predicate::{AttributeMatch, Expected, Predicate};
pub use scope::{AttributeScope, FilterScope};

// Re-export codegen types
pub use codegen::{ConditionCompiler, ExpressionCompiler};
