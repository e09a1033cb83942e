//! Attribute-style access to nested maps.
//!
//! [`Attributes`] is the explicit property-access capability: read, write and
//! test a key by name. Item writes are additionally guarded by a fixed set of
//! reserved names so data keys never shadow the container's own operations.

use std::ops::Index;

use super::{MapError, NestedMap, Value};

/// Prefix marking internal fields. Attribute writes to such keys never reach the data.
pub const INTERNAL_FIELD_MARKER: &str = "__";

/// Names rejected by item writes: every public operation of the container and
/// of [`Attributes`], plus those of a plain mapping.
pub const RESERVED_KEYS: &[&str] = &[
    // mapping operations
    "clear",
    "copy",
    "fromkeys",
    "get",
    "items",
    "keys",
    "pop",
    "popitem",
    "setdefault",
    "update",
    "values",
    // container operations
    "as_mapping",
    "autoconvert",
    "contains_key",
    "current_state",
    "from_json_str",
    "from_mapping",
    "from_source",
    "from_source_with",
    "frozen_state",
    "get_as",
    "get_by_path",
    "get_current_state",
    "get_item",
    "get_mut",
    "hash_current_state",
    "into_inner",
    "is_empty",
    "iter",
    "len",
    "merge",
    "merge_from",
    "new",
    "options",
    "remove",
    "set_by_path",
    "set_item",
    "simple_dict",
    "to_json",
    "to_json_string",
    "try_hash",
    "update_from",
    "with_autoconvert",
    "with_options",
    // attribute operations
    "get_attr",
    "has_attr",
    "set_attr",
];

/// Returns true if `key` cannot be written as an item.
///
/// A key is reserved if it is listed in [`RESERVED_KEYS`] or is a dunder name
/// such as `__init__`.
///
/// ```
/// use dottable::map::is_reserved_key;
///
/// assert!(is_reserved_key("items"));
/// assert!(is_reserved_key("__class__"));
/// assert!(!is_reserved_key("item"));
/// assert!(!is_reserved_key("__"));
/// ```
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key) || is_dunder(key)
}

fn is_dunder(key: &str) -> bool {
    key.len() > 2 * INTERNAL_FIELD_MARKER.len()
        && key.starts_with(INTERNAL_FIELD_MARKER)
        && key.ends_with(INTERNAL_FIELD_MARKER)
}

/// Property-style access by key name.
///
/// ```
/// use dottable::{NestedMap, Value, map::Attributes};
///
/// let mut config = NestedMap::new();
/// config.set_attr("retries", Value::Int(3))?;
///
/// assert!(config.has_attr("retries"));
/// assert_eq!(config.get_attr("retries")?, &3);
/// assert!(config.get_attr("timeout").unwrap_err().is_not_found());
/// # Ok::<(), dottable::map::MapError>(())
/// ```
pub trait Attributes {
    /// Reads the value stored under `key`
    fn get_attr(&self, key: &str) -> Result<&Value, MapError>;

    /// Writes `value` under `key`
    fn set_attr(&mut self, key: &str, value: Value) -> Result<(), MapError>;

    /// Returns true if a value is stored under `key`
    fn has_attr(&self, key: &str) -> bool;
}

impl Attributes for NestedMap {
    /// Reads a data key. Keys that are not identifiers are readable too.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyLookup`] if the key is absent.
    fn get_attr(&self, key: &str) -> Result<&Value, MapError> {
        self.get_item(key)
    }

    /// Writes a data key, wrapping a raw mapping when auto-conversion is on.
    ///
    /// Unlike [`NestedMap::set_item`], ordinary reserved names such as `items`
    /// are accepted here.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ReservedKey`] for keys starting with
    /// [`INTERNAL_FIELD_MARKER`]: the internal fields are not writable.
    fn set_attr(&mut self, key: &str, value: Value) -> Result<(), MapError> {
        if key.starts_with(INTERNAL_FIELD_MARKER) {
            tracing::debug!(key, "rejected attribute write to internal field");
            return Err(MapError::ReservedKey {
                key: key.to_string(),
            });
        }
        self.insert_converted(key.to_string(), value);
        Ok(())
    }

    fn has_attr(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// Panics if the key is absent, like `HashMap` indexing.
impl Index<&str> for NestedMap {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found: {key}"),
        }
    }
}
