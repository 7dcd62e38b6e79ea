//! litmap SDK
//!
//! High-level API for filtering publication lists and maintaining
//! automated lists.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;

// Re-export main types
pub use builder::LitmapEngineBuilder;
pub use config::EngineConfig;
pub use engine::{FilterOutcome, FilterReport, LitmapEngine};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use litmap_compiler::FilterErrorKind;
pub use litmap_core::model::{
    ListId, MappingId, NewPublication, Publication, PublicationId, ReviewFieldType, ReviewerId,
};
pub use litmap_runtime::{ListService, PropagationConfig, PropagationReport};
