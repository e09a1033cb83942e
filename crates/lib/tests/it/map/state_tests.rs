//! Snapshot and hashing tests

use std::collections::HashSet;

use dottable::{
    NestedMap, Value,
    map::{CurrentState, FrozenValue},
};
use serde_json::json;

use super::helpers::*;

#[test]
fn test_live_state_is_an_independent_copy() {
    let mut map = service_config();

    let mut snapshot = map.current_state();
    snapshot.insert("added".to_string(), Value::Int(1));
    assert!(!map.contains_key("added"));

    map.set_item("name", "changed").unwrap();
    assert_eq!(snapshot.get("name"), Some(&Value::from("api")));
}

#[test]
fn test_get_current_state_variants() {
    let map = service_config();

    let live = map.get_current_state(false);
    assert!(!live.is_frozen());
    assert_eq!(live.into_live().unwrap().len(), map.len());

    let frozen = map.get_current_state(true);
    assert!(frozen.is_frozen());
    assert!(matches!(frozen, CurrentState::Frozen(ref state) if *state == map.frozen_state()));
    assert!(frozen.into_live().is_none());
}

#[test]
fn test_frozen_state_recurses() {
    let map = service_config();
    let frozen = map.frozen_state();

    assert_eq!(frozen.len(), 4);
    assert_eq!(frozen.get("name"), Some(&FrozenValue::Text("api".to_string())));

    let Some(FrozenValue::State(server)) = frozen.get("server") else {
        panic!("server should freeze as a state");
    };
    assert!(matches!(server.get("tls"), Some(FrozenValue::State(_))));

    let Some(FrozenValue::List(workers)) = frozen.get("workers") else {
        panic!("workers should freeze as a list");
    };
    assert!(matches!(workers[0], FrozenValue::State(_)));
}

#[test]
fn test_equal_maps_hash_equally() {
    let wrapped = service_config();
    let raw = NestedMap::from_source(wrapped.to_json(), false).unwrap();

    assert_eq!(wrapped, raw);
    assert_eq!(wrapped.frozen_state(), raw.frozen_state());
    assert_eq!(wrapped.hash_current_state(), raw.hash_current_state());
}

#[test]
fn test_key_order_does_not_affect_hash() {
    let a: NestedMap = [("x", 1), ("y", 2)].into_iter().collect();
    let b: NestedMap = [("y", 2), ("x", 1)].into_iter().collect();

    assert_eq!(a, b);
    assert_eq!(a.hash_current_state(), b.hash_current_state());
}

#[test]
fn test_mutation_changes_hash() {
    let mut map = service_config();
    let before = map.hash_current_state();
    assert_eq!(before, map.hash_current_state(), "hash should be stable");

    map.set_by_path("server.port", 9090).unwrap();
    assert_ne!(before, map.hash_current_state());
}

#[test]
fn test_merged_values_hash_like_lists() {
    let merged = map_from(json!({"x": 1})).merge(&map_from(json!({"x": 2})));
    let listed = map_from(json!({"x": [1, 2]}));

    assert_eq!(merged, listed);
    assert_eq!(merged.hash_current_state(), listed.hash_current_state());
}

#[test]
fn test_frozen_states_work_as_set_members() {
    let mut seen = HashSet::new();
    seen.insert(service_config().frozen_state());
    seen.insert(service_config().frozen_state());
    seen.insert(NestedMap::new().frozen_state());
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_direct_hash_is_refused() {
    let map = service_config();
    let err = map.try_hash().unwrap_err();

    assert!(err.is_not_hashable());
    assert!(err.to_string().contains("NestedMap"));
    assert!(err.to_string().contains("hash_current_state()"));
}

#[test]
fn test_large_unsigned_integers_hash_exactly() {
    let a = map_from(json!({"n": u64::MAX}));
    let b = map_from(json!({"n": u64::MAX - 1}));

    assert_ne!(a, b);
    assert_ne!(a.hash_current_state(), b.hash_current_state());
    assert_eq!(a.frozen_state().get("n"), Some(&FrozenValue::UInt(u64::MAX)));
}
