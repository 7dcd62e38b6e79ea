//! Code generation module
//!
//! Transforms filter AST into executable predicates.

pub mod condition_codegen;
pub mod expression_codegen;

pub use condition_codegen::ConditionCompiler;
pub use expression_codegen::ExpressionCompiler;
