//! Identifier newtypes

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }
    };
}

id_type!(
    /// Internal publication id
    PublicationId
);
id_type!(
    /// Publication list id
    ListId
);
id_type!(
    /// Review field id
    FieldId
);
id_type!(
    /// Mapping (project) id
    MappingId
);
id_type!(
    /// Reviewer id
    ReviewerId
);
