//! Ordering of list publications
//!
//! An order key names a built-in attribute, optionally prefixed with `-`
//! for descending order: `-id`, `year`, `-year`, `title`.

use crate::error::{Result, RuntimeError};
use litmap_core::model::{Attribute, Publication};
use litmap_core::Value;
use std::cmp::Ordering;
use std::str::FromStr;

/// Order key applied when none is given
pub const DEFAULT_ORDER: &str = "-id";

/// Parsed order key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub attribute: Attribute,
    pub descending: bool,
}

impl OrderKey {
    /// Sort publications in place; ties fall back to ascending id
    pub fn sort(&self, publications: &mut [Publication]) {
        publications.sort_by(|a, b| {
            let ordering = compare(
                &a.attribute(self.attribute),
                &b.attribute(self.attribute),
            );
            let ordering = if self.descending {
                ordering.reverse()
            } else {
                ordering
            };
            ordering.then(a.id.cmp(&b.id))
        });
    }
}

impl FromStr for OrderKey {
    type Err = RuntimeError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let (name, descending) = match text.strip_prefix('-') {
            Some(name) => (name, true),
            None => (text, false),
        };
        let attribute =
            Attribute::from_name(name).ok_or_else(|| RuntimeError::InvalidOrder(text.to_string()))?;
        Ok(Self {
            attribute,
            descending,
        })
    }
}

impl Default for OrderKey {
    fn default() -> Self {
        Self {
            attribute: Attribute::Id,
            descending: true,
        }
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}
