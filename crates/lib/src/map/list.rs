//! The conflict accumulator produced by merges.
//!
//! A [`MergedList`] is an ordered, duplicate-free sequence of values that
//! collided on the same key. Its distinct type is what lets a later merge
//! recognize it as an accumulator to extend rather than a plain list value
//! to compare as a whole.

use std::slice;

use super::Value;

/// Ordered, duplicate-free accumulation of conflicting values.
///
/// # Examples
///
/// ```
/// use dottable::{MergedList, Value};
///
/// let merged = MergedList::from_pair(Value::Int(1), Value::Int(2));
/// let again = merged.with_appended(Value::Int(2));
///
/// assert_eq!(again.len(), 2); // duplicates are not added
/// assert_eq!(again.as_slice(), &[Value::Int(1), Value::Int(2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedList {
    items: Vec<Value>,
}

impl MergedList {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates the accumulator for a first conflict, receiver's value first
    pub fn from_pair(current: Value, incoming: Value) -> Self {
        let mut merged = Self {
            items: vec![current],
        };
        merged.push(incoming);
        merged
    }

    /// Returns true if an equal value is already accumulated
    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| item == value)
    }

    /// Appends `value` unless an equal value is present.
    ///
    /// Returns whether the value was added.
    pub fn push(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Returns a new accumulator with `value` appended unless already a member
    pub fn with_appended(&self, value: Value) -> Self {
        let mut merged = self.clone();
        merged.push(value);
        merged
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    // Element-wise transforms keep the tag. `f` must preserve equality so the
    // result stays duplicate-free.
    pub(crate) fn map_items(&self, f: impl FnMut(&Value) -> Value) -> Self {
        Self {
            items: self.items.iter().map(f).collect(),
        }
    }

    pub(crate) fn map_into(self, f: impl FnMut(Value) -> Value) -> Self {
        Self {
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

impl FromIterator<Value> for MergedList {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut merged = MergedList::new();
        for value in iter {
            merged.push(value);
        }
        merged
    }
}

impl IntoIterator for MergedList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergedList {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
