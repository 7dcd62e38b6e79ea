//! Publication lists and the follower/subscription graph

use super::ids::{ListId, MappingId, PublicationId, ReviewerId};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a list's membership is maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Curated by hand
    Manual,
    /// Derived from the lists it subscribes to through its criteria
    Automated,
}

impl ListKind {
    pub fn code(&self) -> &'static str {
        match self {
            ListKind::Manual => "M",
            ListKind::Automated => "A",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "M" => Ok(ListKind::Manual),
            "A" => Ok(ListKind::Automated),
            other => Err(CoreError::UnknownListKind(other.to_string())),
        }
    }
}

impl Default for ListKind {
    fn default() -> Self {
        ListKind::Manual
    }
}

/// A named set of publications inside a mapping
///
/// `followers` and `subscriptions` are mirror images across the graph:
/// `b ∈ a.followers` iff `a ∈ b.subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationList {
    pub id: ListId,
    pub mapping: MappingId,
    pub owner: ReviewerId,
    pub name: String,
    pub kind: ListKind,
    /// Filter text applied to subscribed lists (automated lists only)
    #[serde(default)]
    pub criteria: String,
    #[serde(default)]
    pub publications: BTreeSet<PublicationId>,
    /// Lists that draw from this one
    #[serde(default)]
    pub followers: BTreeSet<ListId>,
    /// Lists this one draws from
    #[serde(default)]
    pub subscriptions: BTreeSet<ListId>,
}

impl PublicationList {
    /// Create an empty manual list
    pub fn manual(
        id: ListId,
        mapping: MappingId,
        owner: ReviewerId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            mapping,
            owner,
            name: name.into(),
            kind: ListKind::Manual,
            criteria: String::new(),
            publications: BTreeSet::new(),
            followers: BTreeSet::new(),
            subscriptions: BTreeSet::new(),
        }
    }

    /// Create an empty automated list with the given criteria
    pub fn automated(
        id: ListId,
        mapping: MappingId,
        owner: ReviewerId,
        name: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            kind: ListKind::Automated,
            criteria: criteria.into(),
            ..Self::manual(id, mapping, owner, name)
        }
    }

    pub fn is_automated(&self) -> bool {
        self.kind == ListKind::Automated
    }

    pub fn contains(&self, publication: PublicationId) -> bool {
        self.publications.contains(&publication)
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_list_defaults() {
        let list = PublicationList::manual(ListId(1), MappingId(1), ReviewerId(1), "Inbox");
        assert_eq!(list.kind, ListKind::Manual);
        assert!(list.criteria.is_empty());
        assert!(list.subscriptions.is_empty());
        assert!(list.is_empty());
    }

    #[test]
    fn test_automated_list() {
        let list = PublicationList::automated(
            ListId(2),
            MappingId(1),
            ReviewerId(1),
            "Recent",
            "year__gte=2020",
        );
        assert!(list.is_automated());
        assert_eq!(list.criteria, "year__gte=2020");
        assert_eq!(list.name, "Recent");
    }

    #[test]
    fn test_list_kind_codes() {
        assert_eq!(ListKind::from_code("A").unwrap(), ListKind::Automated);
        assert_eq!(ListKind::Manual.code(), "M");
        assert!(ListKind::from_code("X").is_err());
    }
}
