//! Domain model for collaborative literature mapping
//!
//! - Publications and their built-in filterable attributes
//! - Mappings (collaborative projects) and reviewers
//! - Review fields and their typed values
//! - Publication lists and the follower/subscription graph

pub mod ids;
pub mod list;
pub mod mapping;
pub mod publication;
pub mod review;

pub use ids::{FieldId, ListId, MappingId, PublicationId, ReviewerId};
pub use list::{ListKind, PublicationList};
pub use mapping::Mapping;
pub use publication::{
    clean_title, Attribute, AttributeKind, NewPublication, Publication, VenueType,
};
pub use review::{Criterion, ReviewField, ReviewFieldType, ReviewValue, ValueStorage};
