//! Publication lists and the follower graph
//!
//! Edges are stored on both ends: `follow(source, follower)` records the
//! follower on the source and the source as a subscription of the
//! follower. Membership changes here never propagate by themselves; see
//! `lists::propagation`.

use super::catalog::Catalog;
use crate::error::{Result, RuntimeError};
use litmap_core::model::{ListId, MappingId, PublicationId, PublicationList, ReviewerId};

impl Catalog {
    /// Create an empty manual list
    pub fn create_list(
        &mut self,
        mapping: MappingId,
        owner: ReviewerId,
        name: impl Into<String>,
    ) -> Result<ListId> {
        self.mapping(mapping)?;
        let id = self.next_list_id();
        self.lists
            .insert(id, PublicationList::manual(id, mapping, owner, name));
        Ok(id)
    }

    /// Create an automated list following `source` with the given criteria.
    ///
    /// The view starts empty; the caller propagates from `source` to fill it.
    pub fn create_view(
        &mut self,
        source: ListId,
        owner: ReviewerId,
        name: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Result<ListId> {
        let mapping = self.list(source)?.mapping;
        let id = self.next_list_id();
        self.lists.insert(
            id,
            PublicationList::automated(id, mapping, owner, name, criteria),
        );
        self.follow(source, id)?;
        Ok(id)
    }

    /// Delete a list and detach it from every list it follows or is followed by
    pub fn delete_list(&mut self, id: ListId) -> Result<PublicationList> {
        let removed = self.lists.remove(&id).ok_or(RuntimeError::ListNotFound(id))?;
        for other in removed.followers.iter().chain(removed.subscriptions.iter()) {
            if let Some(list) = self.lists.get_mut(other) {
                list.followers.remove(&id);
                list.subscriptions.remove(&id);
            }
        }
        Ok(removed)
    }

    /// Make `follower` draw publications from `source`
    pub fn follow(&mut self, source: ListId, follower: ListId) -> Result<()> {
        self.list(source)?;
        self.list(follower)?;

        if let Some(list) = self.lists.get_mut(&source) {
            list.followers.insert(follower);
        }
        if let Some(list) = self.lists.get_mut(&follower) {
            list.subscriptions.insert(source);
        }
        Ok(())
    }

    /// Remove the edge between `source` and `follower`; returns whether it existed
    pub fn unfollow(&mut self, source: ListId, follower: ListId) -> Result<bool> {
        self.list(follower)?;
        let existed = self.list_mut(source)?.followers.remove(&follower);
        self.list_mut(follower)?.subscriptions.remove(&source);
        Ok(existed)
    }

    /// Add publications to a list; returns those that were not members yet
    pub fn add_publications<I>(
        &mut self,
        list: ListId,
        publications: I,
    ) -> Result<Vec<PublicationId>>
    where
        I: IntoIterator<Item = PublicationId>,
    {
        let publications: Vec<PublicationId> = publications.into_iter().collect();
        for publication in &publications {
            self.publication(*publication)?;
        }

        let target = self.list_mut(list)?;
        Ok(publications
            .into_iter()
            .filter(|publication| target.publications.insert(*publication))
            .collect())
    }

    /// Remove publications from a list; returns those that were members
    pub fn remove_publications<I>(
        &mut self,
        list: ListId,
        publications: I,
    ) -> Result<Vec<PublicationId>>
    where
        I: IntoIterator<Item = PublicationId>,
    {
        let target = self.list_mut(list)?;
        Ok(publications
            .into_iter()
            .filter(|publication| target.publications.remove(publication))
            .collect())
    }

    pub fn list(&self, id: ListId) -> Result<&PublicationList> {
        self.lists.get(&id).ok_or(RuntimeError::ListNotFound(id))
    }

    pub(crate) fn list_mut(&mut self, id: ListId) -> Result<&mut PublicationList> {
        self.lists.get_mut(&id).ok_or(RuntimeError::ListNotFound(id))
    }

    /// Lists of a mapping, by ascending id
    pub fn lists(&self, mapping: MappingId) -> Vec<&PublicationList> {
        self.lists
            .values()
            .filter(|list| list.mapping == mapping)
            .collect()
    }
}
