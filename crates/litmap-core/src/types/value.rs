//! Attribute value types for litmap filters
//!
//! The `Value` enum represents the data a publication exposes for one
//! built-in attribute. Multi-valued attributes (authors, keywords) are
//! represented as `Array`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value (attribute not set)
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// Returns the string slice if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for `Null`, empty strings and empty arrays
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    /// Flattens the value into its scalar elements.
    ///
    /// Scalars yield themselves, arrays yield their (recursively flattened)
    /// items and `Null` yields nothing.
    pub fn scalars(&self) -> Vec<&Value> {
        match self {
            Value::Null => Vec::new(),
            Value::Array(items) => items.iter().flat_map(|v| v.scalars()).collect(),
            other => vec![other],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(2020u16).as_f64(), Some(2020.0));
        assert_eq!(Value::Bool(true).as_str(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_value_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::String(String::new()).is_empty());
        assert!(Value::Array(vec![]).is_empty());
        assert!(!Value::Number(0.0).is_empty());
        assert!(!Value::from("x").is_empty());
    }

    #[test]
    fn test_value_scalars_flatten_arrays() {
        let value = Value::Array(vec![
            Value::from("a"),
            Value::Array(vec![Value::from("b")]),
            Value::Null,
        ]);
        let scalars = value.scalars();
        assert_eq!(scalars, vec![&Value::from("a"), &Value::from("b")]);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(2020.0).to_string(), "2020");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(
            Value::Array(vec![Value::from("a"), Value::from("b")]).to_string(),
            "[a, b]"
        );
    }

    #[test]
    fn test_value_serde_json() {
        let value = Value::Array(vec![Value::Number(1.0), Value::from("two")]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1.0,"two"]"#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
