//! Conflict-accumulating merge of nested maps.
//!
//! Merging never discards data. For every key of the incoming map:
//!
//! - keys missing from the receiver are inserted;
//! - equal values are kept once;
//! - if the receiver already holds a [`MergedList`], the incoming value is
//!   appended unless it is already a member;
//! - two mappings merge recursively, field by field;
//! - any other pair becomes a new `MergedList` of `[current, incoming]`.
//!
//! ```
//! use dottable::{NestedMap, Value};
//!
//! let a = NestedMap::try_from(serde_json::json!({"x": 1, "a": {"x": 1}}))?;
//! let b = NestedMap::try_from(serde_json::json!({"x": 2, "a": {"y": 2}}))?;
//!
//! let merged = &a + &b;
//! assert_eq!(merged.get_by_path("a.x")?, &1);
//! assert_eq!(merged.get_by_path("a.y")?, &2);
//! assert_eq!(merged["x"].as_merged().unwrap().as_slice(), &[Value::Int(1), Value::Int(2)]);
//! # Ok::<(), dottable::map::MapError>(())
//! ```

use std::{borrow::Cow, ops::Add};

use super::{IntoMapping, MapError, Mapping, MergedList, NestedMap, Value};

/// Views a mapping-like value as a nested map; an existing nested map keeps its
/// own auto-conversion flag.
fn as_nested(value: &Value) -> Option<Cow<'_, NestedMap>> {
    match value {
        Value::Nested(nested) => Some(Cow::Borrowed(nested)),
        // Full conversion: a raw mapping that ends up in an auto-converting
        // result is stored as `Nested`, including the mappings inside it.
        Value::Map(map) => Some(Cow::Owned(NestedMap::from_mapping(map.clone(), true))),
        _ => None,
    }
}

impl NestedMap {
    /// Returns a new map combining this map with `other`.
    ///
    /// The receiver is not modified. The result keeps the receiver's
    /// auto-conversion flag, and every value the merge writes follows it: with
    /// the flag on mappings are stored as nested maps, with it off every written
    /// value is stored in its plain [`simple_dict`](Self::simple_dict) form.
    /// Values kept from the receiver are left as they were.
    pub fn merge(&self, other: &NestedMap) -> NestedMap {
        self.merge_mapping(other.as_mapping())
    }

    /// Merges with any source that can be coerced into a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if `source` cannot be coerced.
    pub fn merge_from(&self, source: impl IntoMapping) -> Result<NestedMap, MapError> {
        let other = source.into_mapping()?.into_inner();
        Ok(self.merge_mapping(&other))
    }

    fn merge_mapping(&self, other: &Mapping) -> NestedMap {
        let mut merged = self.clone();
        for (key, incoming) in other {
            let resolved = match merged.get(key) {
                None => Some(self.stored_value(incoming)),
                Some(current) => self.resolve(key, current, incoming),
            };
            if let Some(value) = resolved {
                merged.insert_converted(key.clone(), value);
            }
        }
        merged
    }

    /// Resolves a key present on both sides. `None` keeps the current value.
    fn resolve(&self, key: &str, current: &Value, incoming: &Value) -> Option<Value> {
        if current == incoming {
            return None;
        }

        if let Value::Merged(accumulated) = current {
            if accumulated.contains(incoming) {
                return None;
            }
            tracing::debug!(key, size = accumulated.len() + 1, "conflict appended to merged values");
            return Some(Value::Merged(accumulated.with_appended(self.stored_value(incoming))));
        }

        if let (Some(current_map), Some(incoming_map)) = (as_nested(current), as_nested(incoming)) {
            tracing::trace!(key, "merging nested maps");
            let nested = current_map.merge(&incoming_map);
            return Some(if self.autoconvert() {
                Value::Nested(nested)
            } else {
                Value::Map(nested.simple_dict())
            });
        }

        tracing::debug!(
            key,
            current = current.type_name(),
            incoming = incoming.type_name(),
            "conflicting values accumulated"
        );
        Some(Value::Merged(MergedList::from_pair(
            self.stored_value(current),
            self.stored_value(incoming),
        )))
    }

    // Form of a value written by the merge into a map with this map's flag.
    fn stored_value(&self, value: &Value) -> Value {
        if !self.autoconvert() {
            return value.to_simple();
        }
        match as_nested(value) {
            Some(nested) => Value::Nested(nested.into_owned()),
            None => value.clone(),
        }
    }
}

/// `a + b` is `a.merge(&b)`
impl Add for NestedMap {
    type Output = NestedMap;

    fn add(self, other: NestedMap) -> NestedMap {
        self.merge(&other)
    }
}

impl Add<&NestedMap> for &NestedMap {
    type Output = NestedMap;

    fn add(self, other: &NestedMap) -> NestedMap {
        self.merge(other)
    }
}
