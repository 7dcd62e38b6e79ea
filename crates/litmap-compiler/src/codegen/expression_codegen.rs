//! Expression compiler
//!
//! Compiles `FilterExpr` AST nodes into predicates.

use super::condition_codegen::ConditionCompiler;
use crate::error::Result;
use crate::predicate::Predicate;
use crate::scope::FilterScope;
use litmap_core::ast::FilterExpr;

/// Expression compiler
pub struct ExpressionCompiler;

impl ExpressionCompiler {
    /// Compile an expression into a predicate
    pub fn compile(scope: &dyn FilterScope, expr: &FilterExpr) -> Result<Predicate> {
        match expr {
            FilterExpr::All => Ok(Predicate::All),

            FilterExpr::Leaf { field, value } => ConditionCompiler::compile(scope, field, value),

            FilterExpr::And { left, right } => Ok(Predicate::and(
                Self::compile(scope, left)?,
                Self::compile(scope, right)?,
            )),

            FilterExpr::Or { left, right } => Ok(Predicate::or(
                Self::compile(scope, left)?,
                Self::compile(scope, right)?,
            )),

            FilterExpr::Not { operand } => Ok(Predicate::negate(Self::compile(scope, operand)?)),
        }
    }
}
