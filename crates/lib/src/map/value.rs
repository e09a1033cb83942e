//! Value types stored inside a [`NestedMap`].
//!
//! Every value is classified once, when it enters the map, into one of the
//! [`Value`] variants. The classification decides how auto-conversion treats it:
//! text is opaque, sequences are walked element by element, mappings are wrapped
//! into nested maps and everything else passes through untouched.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{MapError, MergedList, NestedMap};

/// Insertion-ordered mapping from keys to values.
///
/// This is the plain ("simple") mapping form: it is what [`NestedMap::simple_dict`]
/// returns and what a `NestedMap` stores internally.
pub type Mapping = IndexMap<String, Value>;

/// Values that can be stored in a [`NestedMap`].
///
/// # Value Kinds
///
/// ## Scalars
/// - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::UInt`], [`Value::Float`]
///
/// ## Text
/// - [`Value::Text`] - never converted, even though text is a sequence of characters
///
/// ## Containers
/// - [`Value::List`] - ordered sequence, converted element-wise
/// - [`Value::Map`] - a raw mapping (auto-conversion off, or simple form)
/// - [`Value::Nested`] - a wrapped [`NestedMap`]
/// - [`Value::Merged`] - a [`MergedList`] of values that conflicted during a merge
///
/// # Equality
///
/// Equality is structural on the unwrapped form:
///
/// ```
/// # use dottable::{Mapping, NestedMap, Value};
/// let mut raw = Mapping::new();
/// raw.insert("port".to_string(), Value::Int(8080));
///
/// let nested = NestedMap::from(raw.clone());
/// assert_eq!(Value::Map(raw), Value::Nested(nested));
///
/// // Numbers of different kinds never compare equal
/// assert_ne!(Value::Int(1), Value::Float(1.0));
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Null/none value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// Unsigned integer above `i64::MAX`; smaller integers are always `Int`
    UInt(u64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Raw key-value mapping
    Map(Mapping),
    /// Wrapped nested map
    Nested(NestedMap),
    /// Accumulated merge conflicts
    Merged(MergedList),
}

impl Value {
    /// Returns the kind of this value as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Nested(_) => "nested",
            Value::Merged(_) => "merged",
        }
    }

    /// Returns true for values that are "empty" or zero.
    ///
    /// Falsy values are stored as-is by the constructor, without any
    /// conversion attempt.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::UInt(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Nested(nested) => nested.is_empty(),
            Value::Merged(merged) => merged.is_empty(),
        }
    }

    /// Returns true for plain mappings and nested maps
    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Nested(_))
    }

    /// Returns true for lists and merged lists (text is not a sequence here)
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::List(_) | Value::Merged(_))
    }

    /// Returns true if this value is a merge conflict accumulator
    pub fn is_merged(&self) -> bool {
        matches!(self, Value::Merged(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns any non-negative integer as `u64`
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::Int(n) => u64::try_from(*n).ok(),
            Value::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to view this value as a nested map
    pub fn as_nested(&self) -> Option<&NestedMap> {
        match self {
            Value::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    /// Attempts to view this value as a mutable nested map
    pub fn as_nested_mut(&mut self) -> Option<&mut NestedMap> {
        match self {
            Value::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    pub fn as_merged(&self) -> Option<&MergedList> {
        match self {
            Value::Merged(merged) => Some(merged),
            _ => None,
        }
    }

    /// Views any mapping-like value (raw or nested) as its underlying mapping
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            Value::Nested(nested) => Some(nested.as_mapping()),
            _ => None,
        }
    }

    /// Views any sequence-like value (list or merged list) as a slice
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            Value::Merged(merged) => Some(merged.as_slice()),
            _ => None,
        }
    }

    /// Returns the simple form of this value.
    ///
    /// Nested maps become raw mappings, recursively, including inside lists and
    /// merged lists. A merged list keeps its tag.
    pub fn to_simple(&self) -> Value {
        match self {
            Value::Nested(nested) => Value::Map(nested.simple_dict()),
            Value::Map(map) => Value::Map(simplify_mapping(map)),
            Value::List(items) => Value::List(items.iter().map(Value::to_simple).collect()),
            Value::Merged(merged) => Value::Merged(merged.map_items(|item| item.to_simple())),
            scalar => scalar.clone(),
        }
    }
}

pub(crate) fn simplify_mapping(map: &Mapping) -> Mapping {
    map.iter()
        .map(|(key, value)| (key.clone(), value.to_simple()))
        .collect()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => {
                if let (Some(a), Some(b)) = (self.as_sequence(), other.as_sequence()) {
                    return a == b;
                }
                match (self.as_mapping(), other.as_mapping()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
        }
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"{}\"", s.replace('\"', "\\\""))
}

pub(crate) fn write_mapping(f: &mut fmt::Formatter<'_>, map: &Mapping) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_text(f, key)?;
        write!(f, ": {value}")?;
    }
    write!(f, "}}")
}

fn write_sequence(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

/// Renders the simple form: nested maps print as plain mappings.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write_text(f, s),
            Value::List(items) => write_sequence(f, items),
            Value::Merged(merged) => write_sequence(f, merged.as_slice()),
            Value::Map(map) => write_mapping(f, map),
            Value::Nested(nested) => write_mapping(f, nested.as_mapping()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Merged(merged) => serializer.collect_seq(merged.iter()),
            Value::Map(map) => serializer.collect_map(map),
            Value::Nested(nested) => nested.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// JSON objects become raw mappings; wrapping happens when the value enters a map.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                (None, None) => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::UInt(n) => serde_json::Value::from(*n),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Into::into).collect()),
            Value::Merged(merged) => {
                serde_json::Value::Array(merged.iter().map(Into::into).collect())
            }
            Value::Map(map) => mapping_to_json(map),
            Value::Nested(nested) => mapping_to_json(nested.as_mapping()),
        }
    }
}

pub(crate) fn mapping_to_json(map: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
            .collect(),
    )
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::UInt(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Map(value)
    }
}

impl From<NestedMap> for Value {
    fn from(value: NestedMap) -> Self {
        Value::Nested(value)
    }
}

impl From<MergedList> for Value {
    fn from(value: MergedList) -> Self {
        Value::Merged(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

fn mismatch(expected: &'static str, value: &Value) -> MapError {
    MapError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

impl TryFrom<&Value> for String {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(mismatch("text", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = MapError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(mismatch("text", value)),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(mismatch("int", value)),
        }
    }
}

impl TryFrom<&Value> for u64 {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_uint().ok_or_else(|| mismatch("uint", value))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(*x),
            _ => Err(mismatch("float", value)),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a NestedMap {
    type Error = MapError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nested(nested) => Ok(nested),
            _ => Err(mismatch("nested", value)),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a MergedList {
    type Error = MapError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Merged(merged) => Ok(merged),
            _ => Err(mismatch("merged", value)),
        }
    }
}

// Direct comparisons with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<u64> for Value {
    fn eq(&self, other: &u64) -> bool {
        self.as_uint() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(x) if x == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
