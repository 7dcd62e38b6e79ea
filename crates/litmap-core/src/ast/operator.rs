//! Operators for litmap filters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical keywords recognized between filter terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    /// Conjunction (` and `)
    And,
    /// Disjunction (` or `)
    Or,
    /// Negation (`not ` / ` not `)
    Not,
}

impl Keyword {
    /// Lower-case keyword text
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
        }
    }

    /// Returns true for the binary keywords `and` / `or`
    pub fn is_binary(&self) -> bool {
        matches!(self, Keyword::And | Keyword::Or)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup modifiers, written as a `__suffix` on the filter key
/// (e.g. `year__gte=2020`, `title__icontains=review`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    // Equality
    /// Exact match (default when no modifier is given)
    Exact,
    /// Case-insensitive exact match
    IExact,

    // Text matching
    /// Substring match
    Contains,
    /// Case-insensitive substring match
    IContains,
    /// Prefix match
    StartsWith,
    /// Case-insensitive prefix match
    IStartsWith,
    /// Suffix match
    EndsWith,
    /// Case-insensitive suffix match
    IEndsWith,

    // Ordering
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,

    // Membership
    /// Equal to one of a comma-separated set of alternatives
    In,
    /// Value presence (`true` matches unset values)
    IsNull,
}

impl Lookup {
    /// All supported lookups
    pub const ALL: [Lookup; 14] = [
        Lookup::Exact,
        Lookup::IExact,
        Lookup::Contains,
        Lookup::IContains,
        Lookup::StartsWith,
        Lookup::IStartsWith,
        Lookup::EndsWith,
        Lookup::IEndsWith,
        Lookup::Gt,
        Lookup::Gte,
        Lookup::Lt,
        Lookup::Lte,
        Lookup::In,
        Lookup::IsNull,
    ];

    /// Parse a modifier suffix (without the leading `__`)
    pub fn parse(modifier: &str) -> Option<Lookup> {
        Self::ALL.into_iter().find(|lookup| lookup.as_str() == modifier)
    }

    /// Modifier text as written in filters
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::StartsWith => "startswith",
            Lookup::IStartsWith => "istartswith",
            Lookup::EndsWith => "endswith",
            Lookup::IEndsWith => "iendswith",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::In => "in",
            Lookup::IsNull => "isnull",
        }
    }

    /// Returns true if this lookup ignores case
    pub fn is_case_insensitive(&self) -> bool {
        matches!(
            self,
            Lookup::IExact | Lookup::IContains | Lookup::IStartsWith | Lookup::IEndsWith
        )
    }

    /// Returns true if this is an ordering comparison
    pub fn is_ordering(&self) -> bool {
        matches!(self, Lookup::Gt | Lookup::Gte | Lookup::Lt | Lookup::Lte)
    }

    /// Returns true if this lookup only makes sense on text
    pub fn is_text_match(&self) -> bool {
        matches!(
            self,
            Lookup::IExact
                | Lookup::Contains
                | Lookup::IContains
                | Lookup::StartsWith
                | Lookup::IStartsWith
                | Lookup::EndsWith
                | Lookup::IEndsWith
        )
    }

    /// Compare two strings under this lookup.
    ///
    /// `case_sensitive` only affects `Exact`, `In` and the ordering lookups;
    /// the `i*` lookups always ignore case. `IsNull` never matches here,
    /// presence is decided by the caller.
    pub fn matches_text(&self, candidate: &str, expected: &str, case_sensitive: bool) -> bool {
        let fold = !case_sensitive || self.is_case_insensitive();
        let (candidate, expected) = if fold {
            (candidate.to_lowercase(), expected.to_lowercase())
        } else {
            (candidate.to_string(), expected.to_string())
        };

        match self {
            Lookup::Exact | Lookup::IExact => candidate == expected,
            Lookup::Contains | Lookup::IContains => candidate.contains(&expected),
            Lookup::StartsWith | Lookup::IStartsWith => candidate.starts_with(&expected),
            Lookup::EndsWith | Lookup::IEndsWith => candidate.ends_with(&expected),
            Lookup::Gt => candidate > expected,
            Lookup::Gte => candidate >= expected,
            Lookup::Lt => candidate < expected,
            Lookup::Lte => candidate <= expected,
            Lookup::In => expected.split(',').any(|alt| alt.trim() == candidate),
            Lookup::IsNull => false,
        }
    }

    /// Compare two numbers under this lookup.
    ///
    /// Returns `None` when the lookup is not numeric.
    pub fn matches_number(&self, candidate: f64, expected: f64) -> Option<bool> {
        match self {
            Lookup::Exact => Some(candidate == expected),
            Lookup::Gt => Some(candidate > expected),
            Lookup::Gte => Some(candidate >= expected),
            Lookup::Lt => Some(candidate < expected),
            Lookup::Lte => Some(candidate <= expected),
            _ => None,
        }
    }
}

impl Default for Lookup {
    fn default() -> Self {
        Lookup::Exact
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
