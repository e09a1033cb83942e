//! Auto-conversion of stored values and coercion of constructor sources.
//!
//! Auto-conversion wraps mappings into [`NestedMap`]s, recursively, including
//! mappings found inside sequences. It is best-effort: a value that cannot be
//! converted is kept exactly as it was. [`try_convert`] makes that outcome
//! explicit instead of treating it as a failure.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use super::{CoercionError, MapError, Mapping, NestedMap, Value};

/// Attempts to view `value` as a nested map.
///
/// Returns `None` for anything that is not mapping-shaped; raw mappings are
/// wrapped (with auto-conversion on) and nested maps are copied.
///
/// ```
/// use dottable::{Value, map::try_convert};
///
/// assert!(try_convert(&Value::Int(3)).is_none());
/// assert!(try_convert(&Value::Text("a=b".into())).is_none());
///
/// let json = serde_json::json!({"a": {"b": 1}});
/// let nested = try_convert(&Value::from(json)).unwrap();
/// assert!(nested.get("a").unwrap().as_nested().is_some());
/// ```
pub fn try_convert(value: &Value) -> Option<NestedMap> {
    match value {
        Value::Map(_) | Value::Nested(_) => convert_owned(value.clone()).ok(),
        _ => None,
    }
}

fn convert_owned(value: Value) -> Result<NestedMap, Value> {
    match value {
        Value::Map(map) => Ok(NestedMap::from_mapping(map, true)),
        Value::Nested(nested) => Ok(nested.rewrapped()),
        other => Err(other),
    }
}

fn convert_or_keep(value: Value) -> Value {
    match convert_owned(value) {
        Ok(nested) => Value::Nested(nested),
        Err(raw) => {
            tracing::trace!(kind = raw.type_name(), "not convertible, kept as-is");
            raw
        }
    }
}

/// Conversion applied by the constructor to each top-level entry.
pub(crate) fn convert_entry(value: Value) -> Value {
    if value.is_falsy() {
        return value;
    }
    convert_element(value)
}

fn convert_element(value: Value) -> Value {
    match value {
        Value::Text(_) => value,
        Value::List(items) => Value::List(items.into_iter().map(convert_element).collect()),
        Value::Merged(merged) => Value::Merged(merged.map_into(convert_element)),
        other => convert_or_keep(other),
    }
}

/// Conversion applied by attribute, item and path writes: only a raw mapping
/// is wrapped, and only when the target map auto-converts.
pub(crate) fn convert_written(value: Value, autoconvert: bool) -> Value {
    match value {
        Value::Map(map) if autoconvert => Value::Nested(NestedMap::from_mapping(map, true)),
        other => other,
    }
}

/// A constructor source after coercion.
#[derive(Debug, Clone)]
pub enum MapSource {
    /// The data of an existing nested map, copied without re-conversion
    Container(Mapping),
    /// Plain entries that still go through auto-conversion
    Entries(Mapping),
}

impl MapSource {
    pub fn into_inner(self) -> Mapping {
        match self {
            MapSource::Container(map) | MapSource::Entries(map) => map,
        }
    }
}

/// Inputs a [`NestedMap`] can be constructed from or merged with.
///
/// Implemented for nested maps, mappings, sequences of `(key, value)` pairs,
/// std maps, [`Value`] and `serde_json::Value`. Coercion fails with
/// [`MapError::Construction`] naming the offending input.
pub trait IntoMapping {
    fn into_mapping(self) -> Result<MapSource, MapError>;
}

fn construction_error(input: &dyn fmt::Display, source: CoercionError) -> MapError {
    let input = input.to_string();
    tracing::debug!(%input, reason = %source, "cannot coerce input to a mapping");
    MapError::Construction { input, source }
}

fn check_pairs(items: &[Value]) -> Result<(), CoercionError> {
    for (index, item) in items.iter().enumerate() {
        let Value::List(pair) = item else {
            return Err(CoercionError::InvalidPair {
                index,
                reason: format!("expected a two-element list, found {}", item.type_name()),
            });
        };
        if pair.len() != 2 {
            return Err(CoercionError::InvalidPair {
                index,
                reason: format!("expected 2 elements, found {}", pair.len()),
            });
        }
        if pair[0].as_text().is_none() {
            return Err(CoercionError::InvalidPair {
                index,
                reason: format!("keys must be text, found {}", pair[0].type_name()),
            });
        }
    }
    Ok(())
}

// Callers validate with check_pairs first.
fn collect_pairs(items: Vec<Value>) -> Mapping {
    items
        .into_iter()
        .filter_map(|item| {
            let Value::List(pair) = item else {
                return None;
            };
            let mut pair = pair.into_iter();
            match (pair.next(), pair.next()) {
                (Some(Value::Text(key)), Some(value)) => Some((key, value)),
                _ => None,
            }
        })
        .collect()
}

impl IntoMapping for NestedMap {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Container(self.data))
    }
}

impl IntoMapping for &NestedMap {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Container(self.data.clone()))
    }
}

impl IntoMapping for Mapping {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Entries(self))
    }
}

impl<K: Into<String>, V: Into<Value>> IntoMapping for Vec<(K, V)> {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Entries(
            self.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }
}

impl<K: Into<String>, V: Into<Value>> IntoMapping for HashMap<K, V> {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Entries(
            self.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }
}

impl<K: Into<String>, V: Into<Value>> IntoMapping for BTreeMap<K, V> {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Ok(MapSource::Entries(
            self.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }
}

impl IntoMapping for Value {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        match self {
            Value::Map(map) => Ok(MapSource::Entries(map)),
            Value::Nested(nested) => Ok(MapSource::Container(nested.data)),
            Value::List(items) => match check_pairs(&items) {
                Ok(()) => Ok(MapSource::Entries(collect_pairs(items))),
                Err(source) => Err(construction_error(&Value::List(items), source)),
            },
            other => {
                let source = CoercionError::NotAMapping {
                    kind: other.type_name(),
                };
                Err(construction_error(&other, source))
            }
        }
    }
}

impl IntoMapping for serde_json::Value {
    fn into_mapping(self) -> Result<MapSource, MapError> {
        Value::from(self).into_mapping()
    }
}
