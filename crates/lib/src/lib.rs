//!
//! Dottable: nested maps with attribute-style access and conflict-accumulating merges.
//!
//! ## Core Concepts
//!
//! * **NestedMap (`map::NestedMap`)**: An ordered key-value container. Mapping values, including
//!   mappings inside lists, are wrapped into nested `NestedMap`s on the way in so every level offers
//!   the same access API.
//! * **Values (`map::Value`)**: The tagged union of everything a map can hold: scalars, text, lists,
//!   raw mappings, nested maps and merged conflict lists.
//! * **Access styles**: item access (`get_item`/`set_item`), attribute access (`map::Attributes`) and
//!   dotted paths (`map::Path`, `get_by_path`/`set_by_path`).
//! * **Merging (`NestedMap::merge`)**: Combining two maps recursively without losing data. Conflicting
//!   values accumulate in a `map::MergedList`.
//! * **Snapshots (`map::FrozenState`)**: Immutable, hashable renderings of a map's current contents.

pub mod map;

/// Re-export the core types for easier access.
pub use map::{FrozenState, Mapping, MergedList, NestedMap, Value};

/// Result type used throughout the Dottable library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Dottable library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured map errors from the map module
    #[error(transparent)]
    Map(map::MapError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Map(_) => "map",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a key was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is map-related.
    pub fn is_map_error(&self) -> bool {
        matches!(self, Error::Map(_))
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_type_error(),
            _ => false,
        }
    }
}
