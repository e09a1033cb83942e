//! Error types for nested map operations.
//!
//! This module defines the structured errors raised by [`NestedMap`](super::NestedMap)
//! construction, lookups, writes and hashing. Failures while auto-converting a
//! stored value are never errors; see [`try_convert`](super::try_convert).

use thiserror::Error;

/// Reasons a source value could not be coerced into a key-value mapping.
///
/// Carried as the `source` of [`MapError::Construction`] so the original cause
/// stays available through [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The input is a scalar, text or otherwise not mapping-shaped
    #[error("expected a mapping or a sequence of key-value pairs, found {kind}")]
    NotAMapping { kind: &'static str },

    /// A sequence element could not be read as a `(key, value)` pair
    #[error("element {index} is not a key-value pair: {reason}")]
    InvalidPair { index: usize, reason: String },
}

/// Structured error types for nested map operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MapError {
    /// The constructor input cannot be coerced into a mapping
    #[error("cannot convert input to a mapping: {input}")]
    Construction {
        input: String,
        #[source]
        source: CoercionError,
    },

    /// An item, attribute or path lookup referenced an absent key
    #[error("key not found: {key}")]
    KeyLookup { key: String },

    /// An item write collided with a reserved name
    #[error("key '{key}' is reserved and cannot be written as an item")]
    ReservedKey { key: String },

    /// Direct hashing was requested on a mutable container
    #[error(
        "unhashable type: '{type_name}'. Use hash_current_state() to hash the current state of this object."
    )]
    NotHashable { type_name: &'static str },

    /// A path write ran into an existing value that is not a nested map
    #[error("cannot traverse '{segment}' in path '{path}': value is not a nested map")]
    NotTraversable { path: String, segment: String },

    /// A typed read found a value of a different kind
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl MapError {
    /// Check if the constructor input could not be coerced
    pub fn is_construction_error(&self) -> bool {
        matches!(self, MapError::Construction { .. })
    }

    /// Check if this error reports a missing key or path segment
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::KeyLookup { .. })
    }

    /// Check if a write was rejected because the key is reserved
    pub fn is_reserved_key(&self) -> bool {
        matches!(self, MapError::ReservedKey { .. })
    }

    /// Check if this error came from a direct hash request
    pub fn is_not_hashable(&self) -> bool {
        matches!(self, MapError::NotHashable { .. })
    }

    /// Check if a path write was blocked by a non-map value
    pub fn is_not_traversable(&self) -> bool {
        matches!(self, MapError::NotTraversable { .. })
    }

    /// Check if this error is a type mismatch on a typed read
    pub fn is_type_error(&self) -> bool {
        matches!(self, MapError::TypeMismatch { .. })
    }

    /// Get the offending key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            MapError::KeyLookup { key } | MapError::ReservedKey { key } => Some(key),
            _ => None,
        }
    }

    /// Get the path if this error was raised while walking a path
    pub fn path(&self) -> Option<&str> {
        match self {
            MapError::NotTraversable { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from MapError to the main Error type
impl From<MapError> for crate::Error {
    fn from(err: MapError) -> Self {
        crate::Error::Map(err)
    }
}
