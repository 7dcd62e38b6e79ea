//! In-memory data store
//!
//! The catalog is the single owner of publications, mappings, review
//! fields, review values and publication lists.

pub mod catalog;
pub mod lists;
pub mod scope;
pub mod values;

pub use catalog::Catalog;
pub use scope::CatalogScope;
pub use values::{TagChange, ValueKey, ValueStore};
