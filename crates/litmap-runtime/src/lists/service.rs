//! List service
//!
//! Async facade over a shared catalog. Every membership change runs the
//! mutation and the propagation pass it triggers under one write lock, so
//! a pass always sees a consistent snapshot.

use super::config::PropagationConfig;
use super::order::{OrderKey, DEFAULT_ORDER};
use super::propagation::{propagate, PropagationReport};
use crate::error::Result;
use crate::store::Catalog;
use litmap_compiler::compile_filter;
use litmap_core::model::{
    FieldId, ListId, MappingId, NewPublication, Publication, PublicationId, PublicationList,
    ReviewFieldType, ReviewValue, ReviewerId,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// List service that manages publication lists of a shared catalog
pub struct ListService {
    catalog: Arc<RwLock<Catalog>>,
    config: PropagationConfig,
}

impl ListService {
    /// Create a service over an empty catalog
    pub fn new(config: PropagationConfig) -> Self {
        Self::with_catalog(Catalog::new(), config)
    }

    /// Create a service over an existing catalog
    pub fn with_catalog(catalog: Catalog, config: PropagationConfig) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            config,
        }
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Shared read access to the catalog
    pub async fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    // -------------------------------------------------------------------------
    // Lists
    // -------------------------------------------------------------------------

    pub async fn create_list(
        &self,
        mapping: MappingId,
        owner: ReviewerId,
        name: &str,
    ) -> Result<ListId> {
        let mut catalog = self.catalog.write().await;
        let id = catalog.create_list(mapping, owner, name)?;
        tracing::info!("Created list {} '{}' in mapping {}", id, name, mapping);
        Ok(id)
    }

    /// Create an automated list following `source` and fill it from the
    /// source's current publications
    pub async fn create_view(
        &self,
        source: ListId,
        owner: ReviewerId,
        name: &str,
        criteria: &str,
    ) -> Result<(ListId, PropagationReport)> {
        let mut catalog = self.catalog.write().await;
        self.insert_view(&mut catalog, source, owner, name, criteria)
    }

    /// Like [`create_view`](Self::create_view), but rejects criteria that do
    /// not compile against the source's mapping. The check and the insert
    /// share one write lock.
    pub async fn create_checked_view(
        &self,
        source: ListId,
        owner: ReviewerId,
        name: &str,
        criteria: &str,
    ) -> Result<(ListId, PropagationReport)> {
        let mut catalog = self.catalog.write().await;
        let mapping = catalog.list(source)?.mapping;
        compile_filter(&catalog.scope(mapping, None), criteria)?;
        self.insert_view(&mut catalog, source, owner, name, criteria)
    }

    fn insert_view(
        &self,
        catalog: &mut Catalog,
        source: ListId,
        owner: ReviewerId,
        name: &str,
        criteria: &str,
    ) -> Result<(ListId, PropagationReport)> {
        let id = catalog.create_view(source, owner, name, criteria)?;
        tracing::info!(
            "Created view {} '{}' on list {} with criteria {:?}",
            id,
            name,
            source,
            criteria
        );
        let report = propagate(catalog, source, &self.config)?;
        Ok((id, report))
    }

    pub async fn add_publications(
        &self,
        list: ListId,
        publications: Vec<PublicationId>,
    ) -> Result<PropagationReport> {
        let mut catalog = self.catalog.write().await;
        let added = catalog.add_publications(list, publications)?;
        tracing::debug!("Added {} publication(s) to list {}", added.len(), list);
        propagate(&mut catalog, list, &self.config)
    }

    /// Remove publications from a list. Followers keep what they already have.
    pub async fn remove_publications(
        &self,
        list: ListId,
        publications: Vec<PublicationId>,
    ) -> Result<PropagationReport> {
        let mut catalog = self.catalog.write().await;
        let removed = catalog.remove_publications(list, publications)?;
        tracing::debug!("Removed {} publication(s) from list {}", removed.len(), list);
        propagate(&mut catalog, list, &self.config)
    }

    /// Add every publication of `sources` to `list`
    pub async fn copy_from(&self, list: ListId, sources: &[ListId]) -> Result<PropagationReport> {
        let mut catalog = self.catalog.write().await;

        let mut union = BTreeSet::new();
        for source in sources {
            union.extend(catalog.list(*source)?.publications.iter().copied());
        }
        let added = catalog.add_publications(list, union)?;
        tracing::debug!(
            "Copied {} publication(s) from {} list(s) into list {}",
            added.len(),
            sources.len(),
            list
        );
        propagate(&mut catalog, list, &self.config)
    }

    /// Make `follower` draw from `source` and bring it up to date
    pub async fn follow(&self, source: ListId, follower: ListId) -> Result<PropagationReport> {
        let mut catalog = self.catalog.write().await;
        catalog.follow(source, follower)?;
        tracing::info!("List {} now follows list {}", follower, source);
        propagate(&mut catalog, source, &self.config)
    }

    pub async fn unfollow(&self, source: ListId, follower: ListId) -> Result<bool> {
        let mut catalog = self.catalog.write().await;
        let existed = catalog.unfollow(source, follower)?;
        if existed {
            tracing::info!("List {} no longer follows list {}", follower, source);
        }
        Ok(existed)
    }

    pub async fn delete_list(&self, list: ListId) -> Result<PublicationList> {
        let mut catalog = self.catalog.write().await;
        let removed = catalog.delete_list(list)?;
        tracing::info!("Deleted list {} '{}'", list, removed.name);
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub async fn list(&self, list: ListId) -> Result<PublicationList> {
        let catalog = self.catalog.read().await;
        Ok(catalog.list(list)?.clone())
    }

    /// Publications of a list in default order
    pub async fn publications(&self, list: ListId) -> Result<Vec<Publication>> {
        self.filter_list(list, "", None, None).await
    }

    /// Publications of a list matching `text`, sorted by `order` (default `-id`)
    ///
    /// With a `reviewer`, review-field conditions only see shared values and
    /// that reviewer's own; without one they see every value.
    pub async fn filter_list(
        &self,
        list: ListId,
        text: &str,
        order: Option<&str>,
        reviewer: Option<ReviewerId>,
    ) -> Result<Vec<Publication>> {
        let key: OrderKey = order.unwrap_or(DEFAULT_ORDER).parse()?;
        let catalog = self.catalog.read().await;

        let target = catalog.list(list)?;
        let predicate = compile_filter(&catalog.scope(target.mapping, reviewer), text)?;

        let mut publications = Vec::with_capacity(target.len());
        for id in &target.publications {
            let publication = catalog.publication(*id)?;
            if predicate.matches(publication) {
                publications.push(publication.clone());
            }
        }
        key.sort(&mut publications);
        Ok(publications)
    }

    // -------------------------------------------------------------------------
    // Catalog passthroughs
    // -------------------------------------------------------------------------

    pub async fn add_publication(&self, draft: NewPublication) -> PublicationId {
        self.catalog.write().await.add_publication(draft)
    }

    pub async fn create_mapping(&self, name: &str, leader: ReviewerId) -> MappingId {
        self.catalog.write().await.create_mapping(name, leader)
    }

    pub async fn add_reviewer(&self, mapping: MappingId, reviewer: ReviewerId) -> Result<()> {
        self.catalog.write().await.add_reviewer(mapping, reviewer)
    }

    pub async fn create_field(
        &self,
        mapping: MappingId,
        name: &str,
        field_type: ReviewFieldType,
    ) -> Result<FieldId> {
        self.catalog
            .write()
            .await
            .create_field(mapping, name, field_type)
    }

    pub async fn rename_field(&self, field: FieldId, name: &str) -> Result<()> {
        self.catalog.write().await.rename_field(field, name)
    }

    pub async fn delete_field(&self, field: FieldId) -> Result<()> {
        self.catalog.write().await.delete_field(field).map(|_| ())
    }

    pub async fn duplicate_field(&self, field: FieldId) -> Result<FieldId> {
        self.catalog.write().await.duplicate_field(field)
    }

    pub async fn set_value(
        &self,
        field: FieldId,
        publication: PublicationId,
        reviewer: Option<ReviewerId>,
        input: &str,
    ) -> Result<()> {
        self.catalog
            .write()
            .await
            .set_value(field, publication, reviewer, input)
    }

    pub async fn get_value(
        &self,
        field: FieldId,
        publication: PublicationId,
        reviewer: Option<ReviewerId>,
    ) -> Result<Option<ReviewValue>> {
        self.catalog.read().await.get_value(field, publication, reviewer)
    }

    pub async fn all_codes(&self, field: FieldId) -> Result<BTreeSet<String>> {
        self.catalog.read().await.all_codes(field)
    }

    pub async fn rename_code(&self, field: FieldId, old: &str, new: &str) -> Result<usize> {
        self.catalog.write().await.rename_code(field, old, new)
    }
}

impl Clone for ListService {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[tokio::test]
    async fn test_list_service_view_follows_source() {
        let service = ListService::new(PropagationConfig::default());
        let mapping = service.create_mapping("TDD", ReviewerId(1)).await;
        let old = service
            .add_publication(NewPublication::new("10.1/a", "Old", 2015))
            .await;
        let new = service
            .add_publication(NewPublication::new("10.1/b", "New", 2022))
            .await;

        let source = service
            .create_list(mapping, ReviewerId(1), "All")
            .await
            .unwrap();
        let (view, _) = service
            .create_view(source, ReviewerId(1), "Recent", "(year__gt=2020)")
            .await
            .unwrap();

        let report = service
            .add_publications(source, vec![old, new])
            .await
            .unwrap();
        assert_eq!(report.added_to(view), vec![new]);
    }

    #[tokio::test]
    async fn test_list_service_clone_shares_catalog() {
        let service = ListService::new(PropagationConfig::default());
        let clone = service.clone();
        let mapping = service.create_mapping("TDD", ReviewerId(1)).await;
        let list = clone
            .create_list(mapping, ReviewerId(1), "Inbox")
            .await
            .unwrap();
        assert_eq!(service.list(list).await.unwrap().name, "Inbox");
    }

    #[tokio::test]
    async fn test_filter_list_orders_by_default_key() {
        let service = ListService::new(PropagationConfig::default());
        let mapping = service.create_mapping("TDD", ReviewerId(1)).await;
        let list = service
            .create_list(mapping, ReviewerId(1), "All")
            .await
            .unwrap();
        let a = service
            .add_publication(NewPublication::new("10.1/a", "A", 2015))
            .await;
        let b = service
            .add_publication(NewPublication::new("10.1/b", "B", 2022))
            .await;
        service.add_publications(list, vec![a, b]).await.unwrap();

        let ids: Vec<_> = service
            .publications(list)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[tokio::test]
    async fn test_create_checked_view_rejects_broken_criteria() {
        let service = ListService::new(PropagationConfig::default());
        let mapping = service.create_mapping("TDD", ReviewerId(1)).await;
        let source = service
            .create_list(mapping, ReviewerId(1), "All")
            .await
            .unwrap();

        let result = service
            .create_checked_view(source, ReviewerId(1), "Broken", "(year=")
            .await;
        assert!(matches!(result, Err(RuntimeError::Filter(_))));
        let result = service
            .create_checked_view(source, ReviewerId(1), "Unknown", "(rating=3)")
            .await;
        assert!(matches!(result, Err(RuntimeError::Filter(_))));
        assert_eq!(service.read().await.lists(mapping).len(), 1);

        let (view, _) = service
            .create_checked_view(source, ReviewerId(1), "Recent", "(year__gt=2020)")
            .await
            .unwrap();
        assert_eq!(service.list(view).await.unwrap().criteria, "(year__gt=2020)");
    }

    #[tokio::test]
    async fn test_filter_list_sees_only_reviewer_values() {
        let service = ListService::new(PropagationConfig::default());
        let mapping = service.create_mapping("TDD", ReviewerId(1)).await;
        let method = service
            .create_field(mapping, "method", ReviewFieldType::Coding)
            .await
            .unwrap();
        let list = service
            .create_list(mapping, ReviewerId(1), "All")
            .await
            .unwrap();
        let paper = service
            .add_publication(NewPublication::new("10.1/a", "A", 2015))
            .await;
        service.add_publications(list, vec![paper]).await.unwrap();
        service
            .set_value(method, paper, Some(ReviewerId(2)), "ml")
            .await
            .unwrap();

        let cases = [
            (Some(ReviewerId(2)), 1),
            (Some(ReviewerId(3)), 0),
            (None, 1),
        ];
        for (reviewer, expected) in cases {
            let found = service
                .filter_list(list, "(method=ml)", None, reviewer)
                .await
                .unwrap();
            assert_eq!(found.len(), expected, "reviewer {:?}", reviewer);
        }
    }
}
