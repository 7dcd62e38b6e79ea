//! litmap Core - Core types and definitions for the litmap filter engine
//!
//! This crate provides the fundamental types used across the litmap workspace:
//! - Domain model (publications, mappings, review fields, publication lists)
//! - Filter token tree and AST definitions
//! - Lookup modifiers and logical keywords
//! - Value types for attribute data
//! - Error types

pub mod ast;
pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::Value;
