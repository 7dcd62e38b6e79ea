//! Condition compiler
//!
//! Compiles one `field[__lookup]=value` leaf into a predicate. Built-in
//! attributes are tried first, then review fields of the scope.

use crate::error::{CompileError, Result};
use crate::predicate::{AttributeMatch, Expected, Predicate};
use crate::scope::FilterScope;
use litmap_core::ast::Lookup;
use litmap_core::model::{Attribute, AttributeKind};

/// Separator between field name and lookup modifier
pub const LOOKUP_SEPARATOR: &str = "__";

/// Condition (leaf) compiler
pub struct ConditionCompiler;

impl ConditionCompiler {
    /// Compile a single condition
    pub fn compile(scope: &dyn FilterScope, key: &str, value: &str) -> Result<Predicate> {
        let (name, lookup) = Self::split_key(key)?;

        if let Some(attribute) = scope.attribute(name) {
            return Self::compile_attribute(attribute, lookup, value);
        }

        let field = scope
            .review_field(name)
            .ok_or_else(|| CompileError::UnknownField(name.to_string()))?;

        let criterion = field
            .storage()
            .criterion(lookup, value)
            .map_err(|e| CompileError::from_core(&field.name, e))?;

        let publications = scope.matching_publications(&field, &criterion);
        log::debug!(
            "review field '{}' {} {:?} selects {} publication(s)",
            field.name,
            lookup,
            value,
            publications.len()
        );

        Ok(Predicate::MemberOf {
            field: field.name,
            publications,
        })
    }

    /// Split `name__modifier` on the first separator
    pub fn split_key(key: &str) -> Result<(&str, Lookup)> {
        let (name, modifier) = match key.split_once(LOOKUP_SEPARATOR) {
            Some((name, modifier)) => (name, Some(modifier)),
            None => (key, None),
        };

        if name.is_empty() {
            return Err(CompileError::Malformed(format!(
                "condition '{}' has no field name",
                key
            )));
        }

        let lookup = match modifier {
            None => Lookup::default(),
            Some("") => {
                return Err(CompileError::Malformed(format!(
                    "condition '{}' has an empty modifier",
                    key
                )))
            }
            Some(modifier) => {
                Lookup::parse(modifier).ok_or_else(|| CompileError::UnsupportedModifier {
                    field: name.to_string(),
                    modifier: modifier.to_string(),
                })?
            }
        };

        Ok((name, lookup))
    }

    fn compile_attribute(attribute: Attribute, lookup: Lookup, value: &str) -> Result<Predicate> {
        let expected = if lookup == Lookup::IsNull {
            Expected::IsNull(Self::parse_flag(attribute, value)?)
        } else {
            match attribute.kind() {
                AttributeKind::Text => Expected::Text(value.to_string()),
                AttributeKind::Number => {
                    if lookup.is_text_match() {
                        return Err(CompileError::UnsupportedComparison {
                            field: attribute.name().to_string(),
                            lookup: lookup.as_str().to_string(),
                        });
                    }
                    Expected::Numbers(Self::parse_integers(attribute, lookup, value)?)
                }
            }
        };

        Ok(Predicate::Attribute(AttributeMatch {
            attribute,
            lookup,
            expected,
        }))
    }

    fn parse_integers(attribute: Attribute, lookup: Lookup, value: &str) -> Result<Vec<f64>> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<i64>()
                .map(|n| n as f64)
                .map_err(|_| CompileError::InvalidValue {
                    field: attribute.name().to_string(),
                    reason: format!("'{}' is not an integer", raw),
                })
        };

        if lookup == Lookup::In {
            value.split(',').map(parse).collect()
        } else {
            Ok(vec![parse(value)?])
        }
    }

    fn parse_flag(attribute: Attribute, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(CompileError::InvalidValue {
                field: attribute.name().to_string(),
                reason: format!("'{}' is not a boolean", value),
            }),
        }
    }
}
