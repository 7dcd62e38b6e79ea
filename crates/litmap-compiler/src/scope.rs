//! Name resolution for filter compilation

use litmap_core::model::{Attribute, Criterion, PublicationId, ReviewField};
use std::collections::HashSet;

/// What a filter can refer to while it is being compiled
///
/// Implementations expose the review fields of one mapping (optionally
/// restricted to one reviewer's values) and answer value queries for them.
pub trait FilterScope {
    /// Built-in publication attribute by name
    fn attribute(&self, name: &str) -> Option<Attribute> {
        Attribute::from_name(name)
    }

    /// Review field of the current mapping by name
    fn review_field(&self, name: &str) -> Option<ReviewField>;

    /// Publications whose visible value for `field` satisfies `criterion`
    fn matching_publications(
        &self,
        field: &ReviewField,
        criterion: &Criterion,
    ) -> HashSet<PublicationId>;
}

/// Scope with no review fields; only built-in attributes resolve
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeScope;

impl FilterScope for AttributeScope {
    fn review_field(&self, _name: &str) -> Option<ReviewField> {
        None
    }

    fn matching_publications(
        &self,
        _field: &ReviewField,
        _criterion: &Criterion,
    ) -> HashSet<PublicationId> {
        HashSet::new()
    }
}
