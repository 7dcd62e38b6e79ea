//! Review fields and their typed values
//!
//! A review field's type selects one of a closed set of storage variants.
//! Each variant knows how to parse submitted input, which lookups it
//! supports, and how a parsed filter criterion matches a stored value.

use super::ids::{FieldId, MappingId};
use crate::ast::Lookup;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Declared type of a review field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFieldType {
    Text,
    Number,
    Boolean,
    List,
    SingleSelect,
    MultiSelect,
    Coding,
}

impl ReviewFieldType {
    /// One-letter code used in stored records
    pub fn code(&self) -> &'static str {
        match self {
            ReviewFieldType::Text => "T",
            ReviewFieldType::Number => "N",
            ReviewFieldType::Boolean => "B",
            ReviewFieldType::List => "L",
            ReviewFieldType::SingleSelect => "S",
            ReviewFieldType::MultiSelect => "M",
            ReviewFieldType::Coding => "C",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "T" => Ok(ReviewFieldType::Text),
            "N" => Ok(ReviewFieldType::Number),
            "B" => Ok(ReviewFieldType::Boolean),
            "L" => Ok(ReviewFieldType::List),
            "S" => Ok(ReviewFieldType::SingleSelect),
            "M" => Ok(ReviewFieldType::MultiSelect),
            "C" => Ok(ReviewFieldType::Coding),
            other => Err(CoreError::UnknownFieldType(other.to_string())),
        }
    }

    /// Storage variant backing values of this type
    pub fn storage(&self) -> ValueStorage {
        match self {
            ReviewFieldType::Text | ReviewFieldType::List | ReviewFieldType::SingleSelect => {
                ValueStorage::Text
            }
            ReviewFieldType::Number => ValueStorage::Number,
            ReviewFieldType::Boolean => ValueStorage::Boolean,
            ReviewFieldType::MultiSelect | ReviewFieldType::Coding => ValueStorage::Tags,
        }
    }
}

/// A user-defined, typed annotation schema attached to a mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewField {
    pub id: FieldId,
    pub mapping: MappingId,
    /// Unique within the mapping
    pub name: String,
    pub field_type: ReviewFieldType,
}

impl ReviewField {
    pub fn storage(&self) -> ValueStorage {
        self.field_type.storage()
    }
}

/// Concrete value storage variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueStorage {
    /// One string per (field, publication, reviewer)
    Text,
    /// One number per (field, publication, reviewer)
    Number,
    /// One boolean per (field, publication, reviewer)
    Boolean,
    /// A set of tags per (field, publication, reviewer), one row per tag
    Tags,
}

impl ValueStorage {
    pub fn name(&self) -> &'static str {
        match self {
            ValueStorage::Text => "text",
            ValueStorage::Number => "number",
            ValueStorage::Boolean => "boolean",
            ValueStorage::Tags => "tag",
        }
    }

    /// Whether a lookup can be applied to values of this storage
    pub fn supports(&self, lookup: Lookup) -> bool {
        match self {
            ValueStorage::Text => true,
            ValueStorage::Number => matches!(
                lookup,
                Lookup::Exact
                    | Lookup::Gt
                    | Lookup::Gte
                    | Lookup::Lt
                    | Lookup::Lte
                    | Lookup::In
                    | Lookup::IsNull
            ),
            ValueStorage::Boolean => matches!(lookup, Lookup::Exact | Lookup::IsNull),
            ValueStorage::Tags => !lookup.is_ordering(),
        }
    }

    /// Parse filter text for a lookup into a criterion.
    ///
    /// Fails with `UnsupportedLookup` when the lookup does not apply to this
    /// storage, and with `InvalidValue` when the text cannot be read as the
    /// storage's type.
    pub fn criterion(&self, lookup: Lookup, raw: &str) -> Result<Criterion> {
        if !self.supports(lookup) {
            return Err(CoreError::UnsupportedLookup {
                target: self.name().to_string(),
                lookup: lookup.as_str().to_string(),
            });
        }

        if lookup == Lookup::IsNull {
            return parse_bool(raw).map(Criterion::IsNull);
        }

        match self {
            ValueStorage::Text => Ok(Criterion::Text {
                lookup,
                expected: raw.to_string(),
            }),
            ValueStorage::Tags => Ok(Criterion::Tags {
                lookup,
                expected: raw.to_string(),
            }),
            ValueStorage::Number => {
                let expected = if lookup == Lookup::In {
                    raw.split(',').map(parse_number).collect::<Result<Vec<_>>>()?
                } else {
                    vec![parse_number(raw)?]
                };
                Ok(Criterion::Number { lookup, expected })
            }
            ValueStorage::Boolean => parse_bool(raw).map(Criterion::Boolean),
        }
    }

    /// Parse submitted input into a value of this storage.
    ///
    /// Empty input means "unset" and yields `None`. Tag input is either a
    /// JSON array (of strings or of `{"value": ...}` objects) or a
    /// comma-separated list.
    pub fn parse_input(&self, raw: &str) -> Result<Option<ReviewValue>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        match self {
            ValueStorage::Text => Ok(Some(ReviewValue::Text(raw.to_string()))),
            ValueStorage::Number => parse_number(raw).map(|n| Some(ReviewValue::Number(n))),
            ValueStorage::Boolean => parse_bool(raw).map(|b| Some(ReviewValue::Boolean(b))),
            ValueStorage::Tags => {
                let tags = parse_tags(raw)?;
                if tags.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(ReviewValue::Tags(tags)))
                }
            }
        }
    }
}

impl fmt::Display for ValueStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored review value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ReviewValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Tags(BTreeSet<String>),
}

impl ReviewValue {
    /// Build a tag set value from any iterator of tags
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReviewValue::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn storage(&self) -> ValueStorage {
        match self {
            ReviewValue::Text(_) => ValueStorage::Text,
            ReviewValue::Number(_) => ValueStorage::Number,
            ReviewValue::Boolean(_) => ValueStorage::Boolean,
            ReviewValue::Tags(_) => ValueStorage::Tags,
        }
    }

    /// Returns true for values that mean "unset" (empty text or empty tag set)
    pub fn is_empty(&self) -> bool {
        match self {
            ReviewValue::Text(s) => s.is_empty(),
            ReviewValue::Tags(tags) => tags.is_empty(),
            ReviewValue::Number(_) | ReviewValue::Boolean(_) => false,
        }
    }
}

/// A parsed filter condition against one review field's values
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// `true` matches publications without a value, `false` those with one
    IsNull(bool),
    Text { lookup: Lookup, expected: String },
    Number { lookup: Lookup, expected: Vec<f64> },
    Boolean(bool),
    /// Matches when any stored tag satisfies the lookup
    Tags { lookup: Lookup, expected: String },
}

impl Criterion {
    /// Evaluate against the value stored for one publication (if any)
    pub fn matches(&self, value: Option<&ReviewValue>) -> bool {
        let value = value.filter(|v| !v.is_empty());
        match (self, value) {
            (Criterion::IsNull(expect_null), value) => value.is_none() == *expect_null,
            (_, None) => false,
            (Criterion::Text { lookup, expected }, Some(ReviewValue::Text(text))) => {
                lookup.matches_text(text, expected, true)
            }
            (Criterion::Number { lookup, expected }, Some(ReviewValue::Number(n))) => {
                if *lookup == Lookup::In {
                    expected.iter().any(|e| e == n)
                } else {
                    expected
                        .first()
                        .and_then(|e| lookup.matches_number(*n, *e))
                        .unwrap_or(false)
                }
            }
            (Criterion::Boolean(expected), Some(ReviewValue::Boolean(b))) => b == expected,
            (Criterion::Tags { lookup, expected }, Some(ReviewValue::Tags(tags))) => {
                tags.iter().any(|tag| lookup.matches_text(tag, expected, true))
            }
            _ => false,
        }
    }
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CoreError::InvalidValue(format!("'{}' is not a number", raw)))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(CoreError::InvalidValue(format!("'{}' is not a boolean", raw))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Plain(String),
    Tagged { value: String },
}

fn parse_tags(raw: &str) -> Result<BTreeSet<String>> {
    let raw = raw.trim();
    let tags: Vec<String> = if raw.starts_with('[') {
        let entries: Vec<TagEntry> = serde_json::from_str(raw)
            .map_err(|e| CoreError::InvalidValue(format!("invalid tag list: {}", e)))?;
        entries
            .into_iter()
            .map(|entry| match entry {
                TagEntry::Plain(tag) => tag,
                TagEntry::Tagged { value } => value,
            })
            .collect()
    } else {
        raw.split(',').map(str::to_string).collect()
    };

    Ok(tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}
