//! Filter scope backed by the catalog

use super::catalog::Catalog;
use litmap_compiler::FilterScope;
use litmap_core::model::{Criterion, MappingId, PublicationId, ReviewField, ReviewerId};
use std::collections::HashSet;

/// Review fields of one mapping, optionally restricted to one reviewer.
///
/// A restricted scope sees the reviewer's own values plus shared values.
#[derive(Debug, Clone, Copy)]
pub struct CatalogScope<'a> {
    catalog: &'a Catalog,
    mapping: MappingId,
    reviewer: Option<ReviewerId>,
}

impl<'a> CatalogScope<'a> {
    pub fn mapping(&self) -> MappingId {
        self.mapping
    }

    pub fn reviewer(&self) -> Option<ReviewerId> {
        self.reviewer
    }
}

impl Catalog {
    /// Scope for compiling filters of `mapping`
    pub fn scope(&self, mapping: MappingId, reviewer: Option<ReviewerId>) -> CatalogScope<'_> {
        CatalogScope {
            catalog: self,
            mapping,
            reviewer,
        }
    }
}

impl FilterScope for CatalogScope<'_> {
    fn review_field(&self, name: &str) -> Option<ReviewField> {
        self.catalog.field_by_name(self.mapping, name).cloned()
    }

    fn matching_publications(
        &self,
        field: &ReviewField,
        criterion: &Criterion,
    ) -> HashSet<PublicationId> {
        let visible = self.catalog.values.visible(field, self.reviewer);

        self.catalog
            .publications()
            .map(|publication| publication.id)
            .filter(|id| match visible.get(id) {
                Some(values) if !values.is_empty() => {
                    values.iter().any(|value| criterion.matches(Some(value)))
                }
                _ => criterion.matches(None),
            })
            .collect()
    }
}
