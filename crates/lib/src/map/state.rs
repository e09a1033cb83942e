//! Snapshots of a nested map's current state.
//!
//! A live snapshot is a copy of the top-level mapping. A frozen snapshot is a
//! fully immutable, hashable rendering of the whole tree; it exists only so a
//! mutable map's contents can be hashed at a point in time.

use std::hash::{DefaultHasher, Hash, Hasher};

use super::{MapError, Mapping, NestedMap, Value};

/// Immutable rendering of a map's data: `(key, value)` pairs in insertion order.
///
/// Equality and hashing ignore key order, matching mapping equality, so two
/// equal maps always produce equal hashes.
#[derive(Debug, Clone, Default)]
pub struct FrozenState {
    entries: Vec<(String, FrozenValue)>,
}

/// Immutable rendering of a single [`Value`].
///
/// Floats are kept by bit pattern so they can be hashed. Merged lists freeze
/// as plain sequences, the same way they compare equal to lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrozenValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Text(String),
    List(Vec<FrozenValue>),
    State(FrozenState),
}

impl FrozenValue {
    fn freeze(value: &Value) -> Self {
        match value {
            Value::Null => FrozenValue::Null,
            Value::Bool(b) => FrozenValue::Bool(*b),
            Value::Int(n) => FrozenValue::Int(*n),
            Value::UInt(n) => FrozenValue::UInt(*n),
            // -0.0 and 0.0 compare equal, so they must hash equal
            Value::Float(x) if *x == 0.0 => FrozenValue::Float(0f64.to_bits()),
            Value::Float(x) => FrozenValue::Float(x.to_bits()),
            Value::Text(s) => FrozenValue::Text(s.clone()),
            Value::List(items) => FrozenValue::List(items.iter().map(Self::freeze).collect()),
            Value::Merged(merged) => {
                FrozenValue::List(merged.iter().map(Self::freeze).collect())
            }
            Value::Map(map) => FrozenValue::State(FrozenState::from_mapping(map)),
            Value::Nested(nested) => FrozenValue::State(nested.frozen_state()),
        }
    }
}

impl FrozenState {
    /// Freezes a mapping, recursing into every nested mapping
    pub fn from_mapping(map: &Mapping) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(key, value)| (key.clone(), FrozenValue::freeze(value)))
                .collect(),
        }
    }

    /// Returns the frozen entries in insertion order
    pub fn entries(&self) -> &[(String, FrozenValue)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the frozen value stored under `key`
    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    // Keys are unique, so sorting by key gives a canonical order.
    fn sorted(&self) -> Vec<&(String, FrozenValue)> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }
}

impl PartialEq for FrozenState {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }
}

impl Eq for FrozenState {}

impl Hash for FrozenState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

/// Result of [`NestedMap::get_current_state`].
#[derive(Debug, Clone)]
pub enum CurrentState {
    /// Copy of the top-level mapping
    Live(Mapping),
    /// Recursively frozen snapshot
    Frozen(FrozenState),
}

impl CurrentState {
    pub fn is_frozen(&self) -> bool {
        matches!(self, CurrentState::Frozen(_))
    }

    pub fn into_live(self) -> Option<Mapping> {
        match self {
            CurrentState::Live(map) => Some(map),
            CurrentState::Frozen(_) => None,
        }
    }

    pub fn into_frozen(self) -> Option<FrozenState> {
        match self {
            CurrentState::Frozen(state) => Some(state),
            CurrentState::Live(_) => None,
        }
    }
}

impl NestedMap {
    /// Returns a snapshot of the current state.
    ///
    /// With `frozen` false this is a copy of the top-level mapping: changing the
    /// copy never affects the map. With `frozen` true it is a [`FrozenState`].
    pub fn get_current_state(&self, frozen: bool) -> CurrentState {
        if frozen {
            CurrentState::Frozen(self.frozen_state())
        } else {
            CurrentState::Live(self.current_state())
        }
    }

    /// Returns a copy of the top-level mapping
    pub fn current_state(&self) -> Mapping {
        self.as_mapping().clone()
    }

    /// Returns an immutable, hashable snapshot of the whole tree
    pub fn frozen_state(&self) -> FrozenState {
        FrozenState::from_mapping(self.as_mapping())
    }

    /// Hashes the frozen snapshot of the current state.
    ///
    /// Equal maps hash equally; the value changes as the map is mutated.
    ///
    /// ```
    /// # use dottable::NestedMap;
    /// let mut a: NestedMap = [("x", 1)].into_iter().collect();
    /// let b: NestedMap = [("x", 1)].into_iter().collect();
    /// assert_eq!(a.hash_current_state(), b.hash_current_state());
    ///
    /// a.set_item("y", 2)?;
    /// assert_ne!(a.hash_current_state(), b.hash_current_state());
    /// # Ok::<(), dottable::map::MapError>(())
    /// ```
    pub fn hash_current_state(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.frozen_state().hash(&mut hasher);
        hasher.finish()
    }

    /// Direct hashing of the live map. Always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`MapError::NotHashable`]; use
    /// [`hash_current_state`](Self::hash_current_state) instead.
    pub fn try_hash(&self) -> Result<u64, MapError> {
        Err(MapError::NotHashable {
            type_name: "NestedMap",
        })
    }
}
