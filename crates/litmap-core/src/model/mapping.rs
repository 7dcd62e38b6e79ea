//! Mappings: collaborative review projects

use super::ids::{MappingId, ReviewerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A collaborative project grouping reviewers, lists and review fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    pub id: MappingId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Reviewer who leads the project
    pub leader: ReviewerId,
    /// Reviewers with access to the project (always includes the leader)
    pub reviewers: BTreeSet<ReviewerId>,
}

impl Mapping {
    /// Create a mapping led by `leader`
    pub fn new(id: MappingId, name: impl Into<String>, leader: ReviewerId) -> Self {
        let mut reviewers = BTreeSet::new();
        reviewers.insert(leader);
        Self {
            id,
            name: name.into(),
            description: String::new(),
            leader,
            reviewers,
        }
    }

    /// Returns true if `reviewer` takes part in this mapping
    pub fn is_member(&self, reviewer: ReviewerId) -> bool {
        self.reviewers.contains(&reviewer)
    }
}
