//! In-memory catalog
//!
//! Holds publications, mappings, review fields with their values and the
//! publication lists of every mapping.

use super::values::{ValueKey, ValueStore};
use crate::error::{Result, RuntimeError};
use litmap_core::model::{
    FieldId, ListId, Mapping, MappingId, NewPublication, Publication, PublicationId,
    PublicationList, ReviewField, ReviewFieldType, ReviewValue, ReviewerId,
};
use std::collections::{BTreeMap, BTreeSet};

/// Monotonic id counters, one per entity kind
#[derive(Debug, Clone, Default)]
struct Sequences {
    publication: u64,
    mapping: u64,
    field: u64,
    list: u64,
}

fn next(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// In-memory catalog of everything the filter engine works on
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) publications: BTreeMap<PublicationId, Publication>,
    pub(crate) mappings: BTreeMap<MappingId, Mapping>,
    pub(crate) fields: BTreeMap<FieldId, ReviewField>,
    pub(crate) values: ValueStore,
    pub(crate) lists: BTreeMap<ListId, PublicationList>,
    sequences: Sequences,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_list_id(&mut self) -> ListId {
        ListId(next(&mut self.sequences.list))
    }

    // -------------------------------------------------------------------------
    // Publications
    // -------------------------------------------------------------------------

    /// Store a publication, or return the id of the stored publication with
    /// the same DOI (ignoring case) or the same cleaned title
    pub fn add_publication(&mut self, draft: NewPublication) -> PublicationId {
        if let Some(existing) = self
            .publications
            .values()
            .find(|publication| publication.is_duplicate_of(&draft))
        {
            tracing::debug!(
                "Publication '{}' duplicates {}, reusing it",
                draft.title,
                existing.id
            );
            return existing.id;
        }

        let id = PublicationId(next(&mut self.sequences.publication));
        self.publications.insert(id, Publication::from_new(id, draft));
        id
    }

    pub fn publication(&self, id: PublicationId) -> Result<&Publication> {
        self.publications
            .get(&id)
            .ok_or(RuntimeError::PublicationNotFound(id))
    }

    /// All publications, by ascending id
    pub fn publications(&self) -> impl Iterator<Item = &Publication> {
        self.publications.values()
    }

    // -------------------------------------------------------------------------
    // Mappings
    // -------------------------------------------------------------------------

    pub fn create_mapping(&mut self, name: impl Into<String>, leader: ReviewerId) -> MappingId {
        let id = MappingId(next(&mut self.sequences.mapping));
        self.mappings.insert(id, Mapping::new(id, name, leader));
        id
    }

    pub fn add_reviewer(&mut self, mapping: MappingId, reviewer: ReviewerId) -> Result<()> {
        self.mappings
            .get_mut(&mapping)
            .ok_or(RuntimeError::MappingNotFound(mapping))?
            .reviewers
            .insert(reviewer);
        Ok(())
    }

    pub fn mapping(&self, id: MappingId) -> Result<&Mapping> {
        self.mappings.get(&id).ok_or(RuntimeError::MappingNotFound(id))
    }

    // -------------------------------------------------------------------------
    // Review fields
    // -------------------------------------------------------------------------

    /// Create a review field; names are unique within a mapping
    pub fn create_field(
        &mut self,
        mapping: MappingId,
        name: &str,
        field_type: ReviewFieldType,
    ) -> Result<FieldId> {
        self.mapping(mapping)?;
        let name = self.available_name(mapping, name, None)?;

        let id = FieldId(next(&mut self.sequences.field));
        self.fields.insert(
            id,
            ReviewField {
                id,
                mapping,
                name,
                field_type,
            },
        );
        Ok(id)
    }

    pub fn rename_field(&mut self, field: FieldId, name: &str) -> Result<()> {
        let mapping = self.field(field)?.mapping;
        let name = self.available_name(mapping, name, Some(field))?;
        if let Some(existing) = self.fields.get_mut(&field) {
            existing.name = name;
        }
        Ok(())
    }

    /// Delete a field together with all of its values
    pub fn delete_field(&mut self, field: FieldId) -> Result<ReviewField> {
        let removed = self
            .fields
            .remove(&field)
            .ok_or(RuntimeError::FieldNotFound(field))?;
        let dropped = self.values.remove_field(removed.storage(), field);
        tracing::debug!("Deleted review field '{}' and {} value(s)", removed.name, dropped);
        Ok(removed)
    }

    /// Copy a field and all of its values under a new unique name
    pub fn duplicate_field(&mut self, field: FieldId) -> Result<FieldId> {
        let original = self.field(field)?.clone();

        let mut name = format!("{} (copy)", original.name);
        let mut attempt = 1;
        while self.field_by_name(original.mapping, &name).is_some() {
            attempt += 1;
            name = format!("{} (copy {})", original.name, attempt);
        }

        let copy = self.create_field(original.mapping, &name, original.field_type)?;
        self.values.copy_field(original.storage(), field, copy);
        Ok(copy)
    }

    pub fn field(&self, id: FieldId) -> Result<&ReviewField> {
        self.fields.get(&id).ok_or(RuntimeError::FieldNotFound(id))
    }

    pub fn field_by_name(&self, mapping: MappingId, name: &str) -> Option<&ReviewField> {
        self.fields
            .values()
            .find(|field| field.mapping == mapping && field.name == name)
    }

    /// Review fields of a mapping, by ascending id
    pub fn fields(&self, mapping: MappingId) -> Vec<&ReviewField> {
        self.fields
            .values()
            .filter(|field| field.mapping == mapping)
            .collect()
    }

    fn available_name(
        &self,
        mapping: MappingId,
        name: &str,
        except: Option<FieldId>,
    ) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RuntimeError::InvalidValue(
                "review field name must not be empty".to_string(),
            ));
        }
        match self.field_by_name(mapping, name) {
            Some(existing) if Some(existing.id) != except => Err(RuntimeError::DuplicateName {
                mapping,
                name: name.to_string(),
            }),
            _ => Ok(name.to_string()),
        }
    }

    // -------------------------------------------------------------------------
    // Review values
    // -------------------------------------------------------------------------

    /// Parse submitted input and store it; empty input clears the value
    pub fn set_value(
        &mut self,
        field: FieldId,
        publication: PublicationId,
        reviewer: Option<ReviewerId>,
        input: &str,
    ) -> Result<()> {
        let value = self.field(field)?.storage().parse_input(input)?;
        self.put_value(field, publication, reviewer, value)
    }

    /// Store a typed value; `None` or an empty value clears it
    pub fn put_value(
        &mut self,
        field: FieldId,
        publication: PublicationId,
        reviewer: Option<ReviewerId>,
        value: Option<ReviewValue>,
    ) -> Result<()> {
        self.publication(publication)?;
        let definition = self.field(field)?.clone();
        let change = self.values.put(
            &definition,
            ValueKey::new(field, publication, reviewer),
            value,
        )?;
        if !change.added.is_empty() || !change.removed.is_empty() {
            tracing::debug!(
                "Field '{}' on {}: +{} -{} tag(s)",
                definition.name,
                publication,
                change.added.len(),
                change.removed.len()
            );
        }
        Ok(())
    }

    pub fn get_value(
        &self,
        field: FieldId,
        publication: PublicationId,
        reviewer: Option<ReviewerId>,
    ) -> Result<Option<ReviewValue>> {
        let storage = self.field(field)?.storage();
        Ok(self
            .values
            .get(storage, &ValueKey::new(field, publication, reviewer)))
    }

    /// Every code used by a coding field
    pub fn all_codes(&self, field: FieldId) -> Result<BTreeSet<String>> {
        self.field(field)?;
        Ok(self.values.codes(field))
    }

    /// Rename a code everywhere in a coding field
    pub fn rename_code(&mut self, field: FieldId, old: &str, new: &str) -> Result<usize> {
        self.field(field)?;
        let new = new.trim();
        if new.is_empty() {
            return Err(RuntimeError::InvalidValue("code must not be empty".to_string()));
        }
        Ok(self.values.rename_code(field, old, new))
    }
}
