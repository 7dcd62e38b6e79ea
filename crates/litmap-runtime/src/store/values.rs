//! Review value storage
//!
//! One table per storage variant, keyed by (field, publication, reviewer).
//! A `None` reviewer marks a shared value visible to every reviewer.

use crate::error::{Result, RuntimeError};
use litmap_core::model::{
    FieldId, PublicationId, ReviewField, ReviewValue, ReviewerId, ValueStorage,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Key of one stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueKey {
    pub field: FieldId,
    pub publication: PublicationId,
    pub reviewer: Option<ReviewerId>,
}

impl ValueKey {
    pub fn new(field: FieldId, publication: PublicationId, reviewer: Option<ReviewerId>) -> Self {
        Self {
            field,
            publication,
            reviewer,
        }
    }

    /// Whether a reader restricted to `reviewer` may see this value
    fn visible_to(&self, reviewer: Option<ReviewerId>) -> bool {
        match (reviewer, self.reviewer) {
            (None, _) | (_, None) => true,
            (Some(reader), Some(owner)) => reader == owner,
        }
    }
}

/// Tags added and removed by one tag-set update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagChange {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

/// Typed value tables
#[derive(Debug, Default, Clone)]
pub struct ValueStore {
    text: BTreeMap<ValueKey, String>,
    number: BTreeMap<ValueKey, f64>,
    boolean: BTreeMap<ValueKey, bool>,
    tags: BTreeMap<ValueKey, BTreeSet<String>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or clear the value of `key`.
    ///
    /// `None` (or an empty value) removes what is stored. Tag sets are
    /// replaced by exactly the new set.
    pub fn put(
        &mut self,
        field: &ReviewField,
        key: ValueKey,
        value: Option<ReviewValue>,
    ) -> Result<TagChange> {
        let storage = field.storage();
        let value = value.filter(|v| !v.is_empty());

        if let Some(value) = &value {
            if value.storage() != storage {
                return Err(RuntimeError::ValueTypeMismatch {
                    field: field.name.clone(),
                    expected: storage.name().to_string(),
                    actual: value.storage().name().to_string(),
                });
            }
        }

        let mut change = TagChange::default();
        match (storage, value) {
            (ValueStorage::Text, Some(ReviewValue::Text(text))) => {
                self.text.insert(key, text);
            }
            (ValueStorage::Number, Some(ReviewValue::Number(n))) => {
                self.number.insert(key, n);
            }
            (ValueStorage::Boolean, Some(ReviewValue::Boolean(b))) => {
                self.boolean.insert(key, b);
            }
            (ValueStorage::Tags, Some(ReviewValue::Tags(new_tags))) => {
                let current = self.tags.remove(&key).unwrap_or_default();
                change.removed = current.difference(&new_tags).cloned().collect();
                change.added = new_tags.difference(&current).cloned().collect();
                self.tags.insert(key, new_tags);
            }
            (ValueStorage::Tags, None) => {
                change.removed = self.tags.remove(&key).unwrap_or_default();
            }
            (storage, _) => self.remove(storage, &key),
        }
        Ok(change)
    }

    /// Value stored under exactly this key
    pub fn get(&self, storage: ValueStorage, key: &ValueKey) -> Option<ReviewValue> {
        match storage {
            ValueStorage::Text => self.text.get(key).cloned().map(ReviewValue::Text),
            ValueStorage::Number => self.number.get(key).copied().map(ReviewValue::Number),
            ValueStorage::Boolean => self.boolean.get(key).copied().map(ReviewValue::Boolean),
            ValueStorage::Tags => self.tags.get(key).cloned().map(ReviewValue::Tags),
        }
    }

    /// All values of one field visible to `reviewer`, grouped by publication
    pub fn visible(
        &self,
        field: &ReviewField,
        reviewer: Option<ReviewerId>,
    ) -> HashMap<PublicationId, Vec<ReviewValue>> {
        let mut grouped: HashMap<PublicationId, Vec<ReviewValue>> = HashMap::new();
        for (key, value) in self.entries(field.storage(), field.id) {
            if key.visible_to(reviewer) {
                grouped.entry(key.publication).or_default().push(value);
            }
        }
        grouped
    }

    /// Every tag used by a field, across publications and reviewers
    pub fn codes(&self, field: FieldId) -> BTreeSet<String> {
        self.tags
            .iter()
            .filter(|(key, _)| key.field == field)
            .flat_map(|(_, tags)| tags.iter().cloned())
            .collect()
    }

    /// Replace one tag by another everywhere in a field; returns the
    /// number of tag sets touched
    pub fn rename_code(&mut self, field: FieldId, old: &str, new: &str) -> usize {
        let mut touched = 0;
        for (_, tags) in self.tags.iter_mut().filter(|(key, _)| key.field == field) {
            if tags.remove(old) {
                tags.insert(new.to_string());
                touched += 1;
            }
        }
        touched
    }

    /// Drop every value of a field
    pub fn remove_field(&mut self, storage: ValueStorage, field: FieldId) -> usize {
        let keys: Vec<ValueKey> = self
            .entries(storage, field)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        for key in &keys {
            self.remove(storage, key);
        }
        keys.len()
    }

    /// Copy every value of `from` to `to`
    pub fn copy_field(&mut self, storage: ValueStorage, from: FieldId, to: FieldId) -> usize {
        let entries = self.entries(storage, from);
        let copied = entries.len();
        for (key, value) in entries {
            let key = ValueKey { field: to, ..key };
            match value {
                ReviewValue::Text(text) => {
                    self.text.insert(key, text);
                }
                ReviewValue::Number(n) => {
                    self.number.insert(key, n);
                }
                ReviewValue::Boolean(b) => {
                    self.boolean.insert(key, b);
                }
                ReviewValue::Tags(tags) => {
                    self.tags.insert(key, tags);
                }
            }
        }
        copied
    }

    fn entries(&self, storage: ValueStorage, field: FieldId) -> Vec<(ValueKey, ReviewValue)> {
        fn of_field<'a, T: Clone + 'a>(
            table: &'a BTreeMap<ValueKey, T>,
            field: FieldId,
            wrap: fn(T) -> ReviewValue,
        ) -> impl Iterator<Item = (ValueKey, ReviewValue)> + 'a {
            table
                .iter()
                .filter(move |(key, _)| key.field == field)
                .map(move |(key, value)| (*key, wrap(value.clone())))
        }

        match storage {
            ValueStorage::Text => of_field(&self.text, field, ReviewValue::Text).collect(),
            ValueStorage::Number => of_field(&self.number, field, ReviewValue::Number).collect(),
            ValueStorage::Boolean => of_field(&self.boolean, field, ReviewValue::Boolean).collect(),
            ValueStorage::Tags => of_field(&self.tags, field, ReviewValue::Tags).collect(),
        }
    }

    fn remove(&mut self, storage: ValueStorage, key: &ValueKey) {
        match storage {
            ValueStorage::Text => {
                self.text.remove(key);
            }
            ValueStorage::Number => {
                self.number.remove(key);
            }
            ValueStorage::Boolean => {
                self.boolean.remove(key);
            }
            ValueStorage::Tags => {
                self.tags.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litmap_core::model::{MappingId, ReviewFieldType};

    fn field(id: u64, field_type: ReviewFieldType) -> ReviewField {
        ReviewField {
            id: FieldId(id),
            mapping: MappingId(1),
            name: format!("field{}", id),
            field_type,
        }
    }

    fn key(field: u64, publication: u64, reviewer: Option<u64>) -> ValueKey {
        ValueKey::new(FieldId(field), PublicationId(publication), reviewer.map(ReviewerId))
    }

    #[test]
    fn test_put_and_get_number() {
        let mut store = ValueStore::new();
        let relevance = field(1, ReviewFieldType::Number);
        store
            .put(&relevance, key(1, 1, None), Some(ReviewValue::Number(3.0)))
            .unwrap();
        assert_eq!(
            store.get(ValueStorage::Number, &key(1, 1, None)),
            Some(ReviewValue::Number(3.0))
        );

        store.put(&relevance, key(1, 1, None), None).unwrap();
        assert_eq!(store.get(ValueStorage::Number, &key(1, 1, None)), None);
    }

    #[test]
    fn test_put_type_mismatch() {
        let mut store = ValueStore::new();
        let relevance = field(1, ReviewFieldType::Number);
        let err = store
            .put(&relevance, key(1, 1, None), Some(ReviewValue::Text("high".into())))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::ValueTypeMismatch { .. }));
    }

    #[test]
    fn test_tag_set_replacement() {
        let mut store = ValueStore::new();
        let method = field(2, ReviewFieldType::Coding);

        let change = store
            .put(&method, key(2, 1, None), Some(ReviewValue::tags(["foo", "bar"])))
            .unwrap();
        assert_eq!(change.added.len(), 2);

        let change = store
            .put(&method, key(2, 1, None), Some(ReviewValue::tags(["bar", "baz"])))
            .unwrap();
        assert_eq!(change.added, BTreeSet::from(["baz".to_string()]));
        assert_eq!(change.removed, BTreeSet::from(["foo".to_string()]));

        let change = store
            .put(&method, key(2, 1, None), Some(ReviewValue::tags(Vec::<String>::new())))
            .unwrap();
        assert_eq!(change.removed.len(), 2);
        assert_eq!(store.get(ValueStorage::Tags, &key(2, 1, None)), None);
    }

    #[test]
    fn test_visibility_per_reviewer() {
        let mut store = ValueStore::new();
        let notes = field(3, ReviewFieldType::Text);
        store
            .put(&notes, key(3, 1, Some(7)), Some(ReviewValue::Text("mine".into())))
            .unwrap();
        store
            .put(&notes, key(3, 1, Some(8)), Some(ReviewValue::Text("theirs".into())))
            .unwrap();
        store
            .put(&notes, key(3, 2, None), Some(ReviewValue::Text("shared".into())))
            .unwrap();

        let visible = store.visible(&notes, Some(ReviewerId(7)));
        assert_eq!(visible[&PublicationId(1)], vec![ReviewValue::Text("mine".into())]);
        assert_eq!(visible[&PublicationId(2)], vec![ReviewValue::Text("shared".into())]);

        let everyone = store.visible(&notes, None);
        assert_eq!(everyone[&PublicationId(1)].len(), 2);
    }

    #[test]
    fn test_codes_and_rename() {
        let mut store = ValueStore::new();
        let method = field(2, ReviewFieldType::Coding);
        store
            .put(&method, key(2, 1, None), Some(ReviewValue::tags(["tdd", "bdd"])))
            .unwrap();
        store
            .put(&method, key(2, 2, Some(1)), Some(ReviewValue::tags(["tdd"])))
            .unwrap();

        assert_eq!(store.codes(FieldId(2)).len(), 2);
        assert_eq!(store.rename_code(FieldId(2), "tdd", "test-first"), 2);
        assert!(store.codes(FieldId(2)).contains("test-first"));
        assert!(!store.codes(FieldId(2)).contains("tdd"));
    }

    #[test]
    fn test_copy_and_remove_field() {
        let mut store = ValueStore::new();
        let method = field(2, ReviewFieldType::Coding);
        store
            .put(&method, key(2, 1, None), Some(ReviewValue::tags(["tdd"])))
            .unwrap();

        assert_eq!(store.copy_field(ValueStorage::Tags, FieldId(2), FieldId(5)), 1);
        assert_eq!(store.codes(FieldId(5)).len(), 1);

        assert_eq!(store.remove_field(ValueStorage::Tags, FieldId(2)), 1);
        assert!(store.codes(FieldId(2)).is_empty());
        assert_eq!(store.codes(FieldId(5)).len(), 1);
    }
}
