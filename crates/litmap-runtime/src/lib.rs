//! litmap Runtime - catalog, list propagation and list service
//!
//! This crate owns the in-memory catalog the filter engine works on and
//! keeps automated publication lists in sync with the lists they follow.

pub mod error;
pub mod lists;
pub mod store;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use lists::{
    propagate, Addition, ListService, OrderKey, PropagationConfig, PropagationReport,
    PropagationSkip,
};
pub use store::{Catalog, CatalogScope};
