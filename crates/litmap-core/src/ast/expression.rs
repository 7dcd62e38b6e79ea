//! Filter expression AST nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter expression AST node
///
/// Produced by reducing the raw token tree left to right; `And`/`Or`
/// carry no precedence of their own, the tree shape records the order in
/// which operands were combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FilterExpr {
    /// Matches everything (empty filter)
    All,

    /// `field=value` condition, where `field` may carry a `__lookup` suffix
    Leaf { field: String, value: String },

    /// Both operands must match
    And {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },

    /// Either operand must match
    Or {
        left: Box<FilterExpr>,
        right: Box<FilterExpr>,
    },

    /// Operand must not match
    Not { operand: Box<FilterExpr> },
}

impl FilterExpr {
    /// Create a leaf condition
    pub fn leaf(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpr::Leaf {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a conjunction
    pub fn and(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a disjunction
    pub fn or(left: FilterExpr, right: FilterExpr) -> Self {
        FilterExpr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a negation
    pub fn negate(operand: FilterExpr) -> Self {
        FilterExpr::Not {
            operand: Box::new(operand),
        }
    }

    /// Returns true for the match-everything expression
    pub fn is_all(&self) -> bool {
        matches!(self, FilterExpr::All)
    }

    /// Field keys referenced by this expression, in order of appearance
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FilterExpr::All => {}
            FilterExpr::Leaf { field, .. } => out.push(field),
            FilterExpr::And { left, right } | FilterExpr::Or { left, right } => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
            FilterExpr::Not { operand } => operand.collect_fields(out),
        }
    }
}

impl fmt::Display for FilterExpr {
    /// Renders the expression back into filter syntax, fully parenthesized
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpr::All => Ok(()),
            FilterExpr::Leaf { field, value } => write!(f, "({}={})", field, value),
            FilterExpr::And { left, right } => write!(f, "({} and {})", left, right),
            FilterExpr::Or { left, right } => write!(f, "({} or {})", left, right),
            FilterExpr::Not { operand } => write!(f, "(not {})", operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_expr_builders() {
        let expr = FilterExpr::and(FilterExpr::leaf("x", "y"), FilterExpr::leaf("a", "b"));
        match expr {
            FilterExpr::And { left, right } => {
                assert_eq!(*left, FilterExpr::leaf("x", "y"));
                assert_eq!(*right, FilterExpr::leaf("a", "b"));
            }
            _ => panic!("Expected And"),
        }
    }

    #[test]
    fn test_filter_expr_fields() {
        let expr = FilterExpr::or(
            FilterExpr::negate(FilterExpr::leaf("year", "2020")),
            FilterExpr::leaf("relevance__gte", "3"),
        );
        assert_eq!(expr.fields(), vec!["year", "relevance__gte"]);
        assert!(FilterExpr::All.fields().is_empty());
    }

    #[test]
    fn test_filter_expr_display() {
        let expr = FilterExpr::and(
            FilterExpr::leaf("x", "y"),
            FilterExpr::negate(FilterExpr::leaf("a", "b")),
        );
        assert_eq!(expr.to_string(), "((x=y) and (not (a=b)))");
        assert_eq!(FilterExpr::All.to_string(), "");
    }
}
