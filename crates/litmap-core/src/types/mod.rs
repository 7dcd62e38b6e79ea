//! Type system for litmap
//!
//! Attribute values produced by publications and consumed by compiled
//! filter predicates.

pub mod value;

pub use value::Value;
