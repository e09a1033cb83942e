//! Attribute-accessible nested maps.
//!
//! This module provides [`NestedMap`], a recursive container over an ordered
//! key-value mapping. Nested mappings, including mappings inside lists, are
//! wrapped into `NestedMap`s as they enter the container, so every level offers
//! the same access API: item access, attribute-style access through
//! [`Attributes`], and dotted [`Path`] access.
//!
//! Two containers combine with [`NestedMap::merge`]: overlapping sub-maps merge
//! field by field, and conflicting scalars accumulate in a [`MergedList`] instead
//! of being overwritten.
//!
//! # Usage
//!
//! ```
//! use dottable::{NestedMap, Value};
//!
//! let base = NestedMap::try_from(serde_json::json!({
//!     "server": {"host": "localhost", "port": 8080},
//!     "debug": false,
//! }))?;
//! let overrides = NestedMap::try_from(serde_json::json!({
//!     "server": {"port": 9090, "tls": true},
//! }))?;
//!
//! let merged = base.merge(&overrides);
//! assert_eq!(merged.get_by_path("server.host")?, "localhost");
//! assert_eq!(merged.get_by_path("server.tls")?, &true);
//!
//! // The conflicting port keeps both values, receiver's first
//! let port = merged.get_by_path("server.port")?.as_merged().unwrap();
//! assert_eq!(port.as_slice(), &[Value::Int(8080), Value::Int(9090)]);
//! # Ok::<(), dottable::map::MapError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod attr;
pub mod convert;
pub mod errors;
pub mod list;
pub mod merge;
pub mod options;
pub mod path;
pub mod state;
pub mod value;

pub use attr::{Attributes, INTERNAL_FIELD_MARKER, RESERVED_KEYS, is_reserved_key};
pub use convert::{IntoMapping, MapSource, try_convert};
pub use errors::{CoercionError, MapError};
pub use list::MergedList;
pub use options::Options;
pub use path::{Path, PathBuf};
pub use state::{CurrentState, FrozenState, FrozenValue};
pub use value::{Mapping, Value};

// Re-export the macro from crate root
pub use crate::path;

use convert::{convert_entry, convert_written};

/// A recursive, attribute-accessible wrapper over an ordered mapping.
///
/// # Core Operations
///
/// - **Construction**: [`new`](Self::new), [`from_source`](Self::from_source), `TryFrom`, `FromIterator`
/// - **Item access**: [`get_item`](Self::get_item), [`set_item`](Self::set_item), [`get`](Self::get)
/// - **Attribute access**: the [`Attributes`] trait, `map["key"]`
/// - **Path access**: [`get_by_path`](Self::get_by_path), [`set_by_path`](Self::set_by_path)
/// - **Combining**: [`merge`](Self::merge) (conflict-accumulating, also `a + b`), [`update`](Self::update)
/// - **Snapshots**: [`simple_dict`](Self::simple_dict), [`frozen_state`](Self::frozen_state),
///   [`hash_current_state`](Self::hash_current_state)
///
/// # Auto-conversion
///
/// With `autoconvert` on (the default), mapping values are stored as nested
/// `NestedMap`s. With it off, values are stored exactly as given. Either way,
/// equality and display use the unwrapped [`simple_dict`](Self::simple_dict)
/// form, so the flag never affects whether two maps are equal.
///
/// ```
/// # use dottable::{NestedMap, Value};
/// let source = serde_json::json!({"db": {"name": "main"}});
///
/// let wrapped = NestedMap::from_source(source.clone(), true)?;
/// let raw = NestedMap::from_source(source, false)?;
///
/// assert!(matches!(wrapped.get("db"), Some(Value::Nested(_))));
/// assert!(matches!(raw.get("db"), Some(Value::Map(_))));
/// assert_eq!(wrapped, raw);
/// # Ok::<(), dottable::map::MapError>(())
/// ```
///
/// # Hashing
///
/// `NestedMap` is mutable and deliberately does not implement `Hash`; use
/// [`hash_current_state`](Self::hash_current_state) to hash a snapshot.
#[derive(Debug, Clone)]
pub struct NestedMap {
    data: Mapping,
    autoconvert: bool,
}

impl NestedMap {
    /// Creates an empty map with auto-conversion on
    pub fn new() -> Self {
        Self::with_autoconvert(true)
    }

    /// Creates an empty map with the given auto-conversion flag
    pub fn with_autoconvert(autoconvert: bool) -> Self {
        Self {
            data: Mapping::new(),
            autoconvert,
        }
    }

    /// Creates an empty map configured by `options`
    pub fn with_options(options: Options) -> Self {
        Self::with_autoconvert(options.autoconvert)
    }

    /// Builds a map from any source that can be coerced into a mapping.
    ///
    /// If `source` is already a `NestedMap`, its top-level entries are copied as
    /// they are and only the flag is taken from `autoconvert`. Any other source
    /// is coerced into a mapping and, when `autoconvert` is on, each entry is
    /// converted: falsy values and text are kept, sequences are converted
    /// element-wise, and mappings are wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if `source` cannot be coerced.
    ///
    /// ```
    /// # use dottable::{NestedMap, Value};
    /// let pairs = vec![("name", Value::from("web")), ("replicas", Value::from(3))];
    /// let map = NestedMap::from_source(pairs, true)?;
    /// assert_eq!(map.len(), 2);
    ///
    /// let err = NestedMap::from_source(Value::Int(5), true).unwrap_err();
    /// assert!(err.is_construction_error());
    /// # Ok::<(), dottable::map::MapError>(())
    /// ```
    pub fn from_source(source: impl IntoMapping, autoconvert: bool) -> Result<Self, MapError> {
        let data = match source.into_mapping()? {
            MapSource::Container(data) => data,
            MapSource::Entries(entries) => Self::convert_entries(entries, autoconvert),
        };
        Ok(Self { data, autoconvert })
    }

    /// Builds a map from `source` using `options`
    pub fn from_source_with(source: impl IntoMapping, options: Options) -> Result<Self, MapError> {
        Self::from_source(source, options.autoconvert)
    }

    /// Builds a map from plain entries, converting them when `autoconvert` is on
    pub fn from_mapping(entries: Mapping, autoconvert: bool) -> Self {
        Self {
            data: Self::convert_entries(entries, autoconvert),
            autoconvert,
        }
    }

    fn convert_entries(entries: Mapping, autoconvert: bool) -> Mapping {
        if !autoconvert {
            return entries;
        }
        entries
            .into_iter()
            .map(|(key, value)| (key, convert_entry(value)))
            .collect()
    }

    // Same data, auto-conversion on.
    pub(crate) fn rewrapped(self) -> Self {
        Self {
            data: self.data,
            autoconvert: true,
        }
    }

    /// Returns whether mapping values are wrapped on write
    pub fn autoconvert(&self) -> bool {
        self.autoconvert
    }

    /// Returns the options this map was created with
    pub fn options(&self) -> Options {
        Options::new().with_autoconvert(self.autoconvert)
    }

    /// Returns the number of top-level keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.data.contains_key(key.as_ref())
    }

    /// Returns an iterator over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Returns an iterator over values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.data.values()
    }

    /// Returns an iterator over key-value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Gets a top-level value
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
        self.data.get(key.as_ref())
    }

    /// Gets a mutable reference to a top-level value
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Value> {
        self.data.get_mut(key.as_ref())
    }

    /// Gets a top-level value with automatic type conversion.
    ///
    /// Returns `None` if the key is missing or the value has another type.
    ///
    /// ```
    /// # use dottable::NestedMap;
    /// let map: NestedMap = [("name", "web")].into_iter().collect();
    /// assert_eq!(map.get_as::<&str>("name"), Some("web"));
    /// assert_eq!(map.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: impl AsRef<str>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = MapError>,
    {
        T::try_from(self.get(key)?).ok()
    }

    /// Looks up a top-level value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyLookup`] if the key is absent.
    pub fn get_item(&self, key: impl AsRef<str>) -> Result<&Value, MapError> {
        let key = key.as_ref();
        self.data.get(key).ok_or_else(|| MapError::KeyLookup {
            key: key.to_string(),
        })
    }

    /// Stores a top-level value.
    ///
    /// A raw mapping value is wrapped into a `NestedMap` when auto-conversion is on.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ReservedKey`] if `key` is a reserved name (see
    /// [`is_reserved_key`]); the map is left unchanged.
    ///
    /// ```
    /// # use dottable::NestedMap;
    /// let mut map = NestedMap::new();
    /// map.set_item("name", "web")?;
    ///
    /// assert!(map.set_item("items", 1).unwrap_err().is_reserved_key());
    /// assert_eq!(map.len(), 1);
    /// # Ok::<(), dottable::map::MapError>(())
    /// ```
    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), MapError> {
        let key = key.into();
        if is_reserved_key(&key) {
            tracing::debug!(%key, "rejected item write to reserved key");
            return Err(MapError::ReservedKey { key });
        }
        self.insert_converted(key, value.into());
        Ok(())
    }

    // Write path shared by item, attribute and merge inserts; no reserved check.
    pub(crate) fn insert_converted(&mut self, key: String, value: Value) -> Option<Value> {
        let value = convert_written(value, self.autoconvert);
        self.data.insert(key, value)
    }

    /// Removes a top-level key, keeping the order of the remaining keys
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Value> {
        self.data.shift_remove(key.as_ref())
    }

    /// Gets a value by dotted path.
    ///
    /// Each segment indexes into the mapping reached so far, through nested maps
    /// and raw mappings alike.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyLookup`] carrying the full path if a segment is
    /// absent or the value reached so far is not a mapping.
    pub fn get_by_path(&self, path: impl AsRef<Path>) -> Result<&Value, MapError> {
        let path = path.as_ref();
        let not_found = || MapError::KeyLookup {
            key: path.to_string(),
        };

        let mut segments = path.segments();
        let first = segments.next().ok_or_else(not_found)?;
        let mut current = self.data.get(first).ok_or_else(not_found)?;
        for segment in segments {
            current = current
                .as_mapping()
                .and_then(|mapping| mapping.get(segment))
                .ok_or_else(not_found)?;
        }
        Ok(current)
    }

    /// Sets a value by dotted path, creating intermediate maps as needed.
    ///
    /// Missing intermediate segments are filled with empty `NestedMap`s; the
    /// final segment is written with [`set_item`](Self::set_item) semantics.
    ///
    /// # Errors
    ///
    /// - [`MapError::ReservedKey`] if the final segment is reserved (checked
    ///   before anything is created)
    /// - [`MapError::NotTraversable`] if an existing intermediate value is not
    ///   a `NestedMap`
    ///
    /// ```
    /// # use dottable::NestedMap;
    /// let mut map = NestedMap::new();
    /// map.set_by_path("logging.level", "info")?;
    /// assert_eq!(map.get_by_path("logging.level")?, "info");
    ///
    /// let err = map.set_by_path("logging.level.file", "out.log").unwrap_err();
    /// assert!(err.is_not_traversable());
    /// # Ok::<(), dottable::map::MapError>(())
    /// ```
    pub fn set_by_path(&mut self, path: impl AsRef<Path>, value: impl Into<Value>) -> Result<(), MapError> {
        let path = path.as_ref();
        let (parent, last) = path.split_last();
        if is_reserved_key(last) {
            return Err(MapError::ReservedKey {
                key: last.to_string(),
            });
        }

        let mut target = self;
        for segment in parent.into_iter().flat_map(Path::segments) {
            let entry = target
                .data
                .entry(segment.to_string())
                .or_insert_with(|| Value::Nested(NestedMap::new()));
            target = match entry {
                Value::Nested(nested) => nested,
                other => {
                    tracing::debug!(%path, segment, kind = other.type_name(), "path blocked by non-map value");
                    return Err(MapError::NotTraversable {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
            };
        }
        target.set_item(last, value)
    }

    /// Last-writer-wins shallow update from another map.
    ///
    /// Unlike [`merge`](Self::merge) this mutates the receiver and does not
    /// track conflicts: values from `other` replace existing ones.
    pub fn update(&mut self, other: &NestedMap) {
        self.data
            .extend(other.data.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    /// Last-writer-wins shallow update from any mapping source.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Construction`] if `source` cannot be coerced; the
    /// receiver is left unchanged.
    pub fn update_from(&mut self, source: impl IntoMapping) -> Result<(), MapError> {
        let other = source.into_mapping()?.into_inner();
        self.data.extend(other);
        Ok(())
    }

    /// Returns a fresh map (auto-conversion on) built from a copy of this map's entries
    pub fn copy(&self) -> NestedMap {
        NestedMap::from_mapping(self.data.clone(), true)
    }

    /// Returns this map's data with every nested map unwrapped into a plain mapping.
    ///
    /// This is the canonical form used for equality and display, and the form to
    /// hand to a serializer.
    pub fn simple_dict(&self) -> Mapping {
        value::simplify_mapping(&self.data)
    }

    /// Borrows the internal mapping
    pub fn as_mapping(&self) -> &Mapping {
        &self.data
    }

    /// Consumes the map, returning the internal mapping
    pub fn into_inner(self) -> Mapping {
        self.data
    }

    /// Converts the simple form into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        value::mapping_to_json(&self.data)
    }

    /// Serializes the simple form as a JSON string
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object into a map with auto-conversion on
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_source(value, true)?)
    }
}

impl Default for NestedMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw and nested mappings compare by contents at every depth, so this agrees
/// with comparing the [`simple_dict`](Self::simple_dict) forms.
impl PartialEq for NestedMap {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for NestedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<NestedMap ")?;
        value::write_mapping(f, &self.data)?;
        write!(f, ">")
    }
}

impl Serialize for NestedMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(&self.data)
    }
}

impl<'de> Deserialize<'de> for NestedMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        NestedMap::from_source(value, true).map_err(serde::de::Error::custom)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for NestedMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        NestedMap::from_mapping(entries, true)
    }
}

impl From<Mapping> for NestedMap {
    fn from(entries: Mapping) -> Self {
        NestedMap::from_mapping(entries, true)
    }
}

impl TryFrom<serde_json::Value> for NestedMap {
    type Error = MapError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        NestedMap::from_source(value, true)
    }
}

impl TryFrom<Value> for NestedMap {
    type Error = MapError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        NestedMap::from_source(value, true)
    }
}

impl<'a> IntoIterator for &'a NestedMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
