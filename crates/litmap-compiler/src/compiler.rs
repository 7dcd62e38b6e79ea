//! Main compiler
//!
//! Entry points that turn filter text or a parsed `FilterExpr` into a
//! `Predicate` bound to one scope.

use crate::codegen::ExpressionCompiler;
use crate::error::Result;
use crate::predicate::Predicate;
use crate::scope::FilterScope;
use litmap_core::ast::FilterExpr;
use litmap_parser::FilterParser;

/// Compile a parsed expression against a scope
pub fn compile(scope: &dyn FilterScope, expr: &FilterExpr) -> Result<Predicate> {
    ExpressionCompiler::compile(scope, expr)
}

/// Parse and compile filter text against a scope
pub fn compile_filter(scope: &dyn FilterScope, text: &str) -> Result<Predicate> {
    let expr = FilterParser::parse(text)?;
    let predicate = compile(scope, &expr)?;
    log::debug!("compiled filter {:?} ({} condition(s))", text, expr.fields().len());
    Ok(predicate)
}
