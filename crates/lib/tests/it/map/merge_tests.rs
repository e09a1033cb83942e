//! Conflict-accumulating merge tests

use dottable::{NestedMap, Value};
use serde_json::json;

use super::helpers::*;

#[test]
fn test_merge_with_empty_is_identity() {
    let map = service_config();

    assert_eq!(map.merge(&NestedMap::new()), map);
    assert_eq!(NestedMap::new().merge(&map), map);
}

#[test]
fn test_merge_disjoint_keys() {
    let a = map_from(json!({"a": 1}));
    let b = map_from(json!({"b": 2}));

    let merged = a.merge(&b);
    assert_eq!(merged, map_from(json!({"a": 1, "b": 2})));
    assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_equal_values_are_kept_once() {
    let a = map_from(json!({"x": 1, "tags": ["a", "b"]}));
    let merged = a.merge(&a.clone());

    assert_eq!(merged, a);
    assert_eq!(merged.get("x"), Some(&Value::Int(1)));
}

#[test]
fn test_conflicts_accumulate_in_order() {
    let a = map_from(json!({"x": 1}));
    let b = map_from(json!({"x": 2}));
    let c = map_from(json!({"x": 3}));

    let ab = a.merge(&b);
    assert_merged(ab.get("x").unwrap(), &[Value::Int(1), Value::Int(2)]);

    let ba = b.merge(&a);
    assert_merged(ba.get("x").unwrap(), &[Value::Int(2), Value::Int(1)]);

    let abc = ab.merge(&c);
    assert_merged(abc.get("x").unwrap(), &[Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn test_repeated_merge_does_not_duplicate() {
    let a = map_from(json!({"x": 1}));
    let b = map_from(json!({"x": 2}));

    let once = a.merge(&b);
    let twice = once.merge(&b);
    assert_merged(twice.get("x").unwrap(), &[Value::Int(1), Value::Int(2)]);

    let back = twice.merge(&a);
    assert_merged(back.get("x").unwrap(), &[Value::Int(1), Value::Int(2)]);
    assert_eq!(back, once);
}

#[test]
fn test_nested_maps_merge_recursively() {
    let a = map_from(json!({"a": {"x": 1, "inner": {"p": true}}}));
    let b = map_from(json!({"a": {"y": 2, "inner": {"q": false}}}));

    let merged = a.merge(&b);
    assert_eq!(
        merged,
        map_from(json!({"a": {"x": 1, "inner": {"p": true, "q": false}, "y": 2}}))
    );
    assert!(matches!(merged.get("a"), Some(Value::Nested(_))));
    assert!(matches!(merged.get_by_path("a.inner"), Ok(Value::Nested(_))));
}

#[test]
fn test_conflicts_inside_nested_maps() {
    let a = map_from(json!({"server": {"port": 8080, "host": "localhost"}}));
    let b = map_from(json!({"server": {"port": 9090}}));

    let merged = a.merge(&b);
    assert_eq!(merged.get_by_path("server.host").unwrap(), "localhost");
    assert_merged(
        merged.get_by_path("server.port").unwrap(),
        &[Value::Int(8080), Value::Int(9090)],
    );
}

#[test]
fn test_lists_conflict_as_whole_values() {
    let a = map_from(json!({"l": [1, 2]}));
    let b = map_from(json!({"l": [3]}));

    let merged = a.merge(&b);
    assert_merged(
        merged.get("l").unwrap(),
        &[Value::from(vec![1, 2]), Value::from(vec![3])],
    );
}

#[test]
fn test_plain_list_value_is_not_an_accumulator() {
    // A list stored by the user conflicts as one value, it is never extended
    let a = map_from(json!({"l": [1, 2]}));
    let b = map_from(json!({"l": 3}));

    let merged = a.merge(&b);
    assert_merged(merged.get("l").unwrap(), &[Value::from(vec![1, 2]), Value::Int(3)]);
}

#[test]
fn test_structured_and_scalar_conflict() {
    let a = map_from(json!({"x": {"a": 1}}));
    let b = map_from(json!({"x": 5}));

    let merged = a.merge(&b);
    let Some(Value::Merged(values)) = merged.get("x") else {
        panic!("x should hold merged values");
    };
    assert_eq!(values.len(), 2);
    assert!(matches!(values.get(0), Some(Value::Nested(_))));
    assert_eq!(values.get(1), Some(&Value::Int(5)));

    // The mapping member is recognized on a later merge
    let again = merged.merge(&a);
    assert_eq!(again, merged);
}

#[test]
fn test_merge_without_autoconvert_stores_plain_mappings() {
    let a = raw_map_from(json!({"a": {"x": 1}, "b": {"k": 1}}));
    let b = map_from(json!({"a": {"y": 2}, "b": 7, "c": {"z": 3}, "d": [{"w": 4}]}));

    let merged = a.merge(&b);
    assert!(!merged.autoconvert());
    assert!(matches!(merged.get("a"), Some(Value::Map(_))));
    assert_eq!(merged.get_by_path("a.y").unwrap(), &2);

    let Some(Value::Merged(values)) = merged.get("b") else {
        panic!("b should hold merged values");
    };
    assert!(matches!(values.get(0), Some(Value::Map(_))));

    // Keys the receiver lacked are flattened too, even inside lists
    assert!(matches!(merged.get("c"), Some(Value::Map(_))));
    let d = merged.get("d").and_then(Value::as_list).unwrap();
    assert!(matches!(d[0], Value::Map(_)));
}

#[test]
fn test_merge_with_autoconvert_wraps_inserted_mappings() {
    let a = map_from(json!({"x": 1}));
    let b = raw_map_from(json!({"c": {"z": 3}}));

    let merged = a.merge(&b);
    assert!(matches!(merged.get("c"), Some(Value::Nested(_))));
}

#[test]
fn test_merge_does_not_modify_inputs() {
    let a = service_config();
    let b = map_from(json!({"name": "worker", "server": {"port": 9090}}));
    let (a_before, b_before) = (a.clone(), b.clone());

    let _ = a.merge(&b);
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
    assert_eq!(a.get_by_path("server.port").unwrap(), &8080);
}

#[test]
fn test_merge_from_sources() {
    let a = map_from(json!({"x": 1}));

    let merged = a.merge_from(json!({"x": 2, "extra": {"y": 1}})).unwrap();
    assert_merged(merged.get("x").unwrap(), &[Value::Int(1), Value::Int(2)]);
    // Raw mappings from the source are wrapped on insert
    assert!(matches!(merged.get("extra"), Some(Value::Nested(_))));

    let merged = a.merge_from(vec![("x", 1), ("y", 2)]).unwrap();
    assert_eq!(merged, map_from(json!({"x": 1, "y": 2})));

    let err = a.merge_from(Value::Int(5)).unwrap_err();
    assert!(err.is_construction_error());
}

#[test]
fn test_add_operators() {
    let a = map_from(json!({"x": 1}));
    let b = map_from(json!({"x": 2, "y": 3}));

    let by_ref = &a + &b;
    assert_eq!(by_ref, a.merge(&b));

    let by_value = a.clone() + b.clone();
    assert_eq!(by_value, by_ref);
    assert_eq!(by_value.get("y"), Some(&Value::Int(3)));
}

#[test]
fn test_update_replaces_without_tracking() {
    let mut map = map_from(json!({"x": 1, "keep": true}));
    map.update(&map_from(json!({"x": 2})));

    assert_eq!(map.get("x"), Some(&Value::Int(2)));
    assert_eq!(map.get("keep"), Some(&Value::Bool(true)));

    map.update_from(vec![("x", 3)]).unwrap();
    assert_eq!(map.get("x"), Some(&Value::Int(3)));

    let before = map.clone();
    assert!(map.update_from(Value::from("text")).is_err());
    assert_eq!(map, before);
}
