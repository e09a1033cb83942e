//! Item and attribute access tests

use dottable::{
    NestedMap, Value,
    map::{Attributes, MapError, RESERVED_KEYS, is_reserved_key},
};
use serde_json::json;

use super::helpers::*;

// ===== ITEM ACCESS =====

#[test]
fn test_get_item_and_missing_key() {
    let map = service_config();

    assert_eq!(map.get_item("name").unwrap(), "api");

    let err = map.get_item("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), Some("missing"));
}

#[test]
fn test_set_item_wraps_mappings_when_autoconverting() {
    let mut map = NestedMap::new();
    map.set_item("limits", Value::from(json!({"cpu": 2}))).unwrap();
    assert!(matches!(map.get("limits"), Some(Value::Nested(_))));

    let mut raw = NestedMap::with_autoconvert(false);
    raw.set_item("limits", Value::from(json!({"cpu": 2}))).unwrap();
    assert!(matches!(raw.get("limits"), Some(Value::Map(_))));

    assert_eq!(map, raw);
}

#[test]
fn test_set_item_overwrites_in_place() {
    let mut map: NestedMap = [("a", 1), ("b", 2)].into_iter().collect();
    map.set_item("a", 10).unwrap();

    assert_eq!(map.get_as::<i64>("a"), Some(10));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_reserved_item_keys_are_rejected() {
    let mut map = service_config();
    let before = map.clone();

    let mapping_ops = ["items", "keys", "update", "setdefault"];
    let container_ops = [
        "merge",
        "simple_dict",
        "get_item",
        "set_item",
        "get_as",
        "get_mut",
        "merge_from",
        "update_from",
        "try_hash",
        "current_state",
        "to_json",
        "to_json_string",
        "options",
        "as_mapping",
        "into_inner",
        "from_source",
        "from_json_str",
    ];
    let attribute_ops = ["get_attr", "set_attr", "has_attr"];
    let internal = ["__init__", "__dict__"];

    let all = mapping_ops
        .iter()
        .chain(&container_ops)
        .chain(&attribute_ops)
        .chain(&internal)
        .copied();
    for key in all {
        let err = map.set_item(key, 1).unwrap_err();
        assert!(err.is_reserved_key(), "{key} should be reserved");
        assert!(matches!(&err, MapError::ReservedKey { key: k } if k == key));
    }

    assert_eq!(map, before);
    assert_eq!(map.len(), before.len());
}

#[test]
fn test_reserved_key_set_is_fixed() {
    for key in RESERVED_KEYS {
        assert!(is_reserved_key(key));
    }
    assert!(!is_reserved_key("name"));
    assert!(!is_reserved_key("item"));
    assert!(!is_reserved_key("_private"));
}

#[test]
fn test_typed_getters() {
    let map = map_from(json!({"name": "api", "port": 8080, "ratio": 0.5, "debug": true}));

    assert_eq!(map.get_as::<&str>("name"), Some("api"));
    assert_eq!(map.get_as::<String>("name"), Some("api".to_string()));
    assert_eq!(map.get_as::<i64>("port"), Some(8080));
    assert_eq!(map.get_as::<f64>("ratio"), Some(0.5));
    assert_eq!(map.get_as::<bool>("debug"), Some(true));

    assert_eq!(map.get_as::<i64>("name"), None);
    assert_eq!(map.get_as::<i64>("missing"), None);

    let err = i64::try_from(map.get("name").unwrap()).unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_remove_keeps_order() {
    let mut map: NestedMap = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();

    assert_eq!(map.remove("b"), Some(Value::Int(2)));
    assert_eq!(map.remove("b"), None);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn test_iteration_follows_insertion_order() {
    let map = map_from(json!({"z": 1, "a": 2, "m": 3}));

    let keys: Vec<_> = map.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);

    let values: Vec<_> = (&map).into_iter().map(|(_, value)| value.clone()).collect();
    assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

// ===== ATTRIBUTE ACCESS =====

#[test]
fn test_attribute_read_and_write() {
    let mut config = NestedMap::new();
    config.set_attr("retries", Value::Int(3)).unwrap();
    config.set_attr("backoff", Value::from(json!({"max": 30}))).unwrap();

    assert!(config.has_attr("retries"));
    assert!(!config.has_attr("timeout"));
    assert_eq!(config.get_attr("retries").unwrap(), &3);
    assert!(matches!(config.get_attr("backoff"), Ok(Value::Nested(_))));

    let err = config.get_attr("timeout").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_attribute_write_accepts_method_names() {
    let mut map = NestedMap::new();

    // Only item writes guard method names
    map.set_attr("items", Value::Int(1)).unwrap();
    assert_eq!(map.get_attr("items").unwrap(), &1);
}

#[test]
fn test_attribute_write_rejects_internal_fields() {
    let mut map = NestedMap::new();

    let err = map.set_attr("__autoconvert__", Value::Bool(false)).unwrap_err();
    assert!(err.is_reserved_key());
    assert!(map.autoconvert());
    assert!(map.is_empty());
}

#[test]
fn test_non_identifier_keys_are_readable() {
    let mut map = NestedMap::new();
    map.set_item("content-type", "json").unwrap();
    map.set_item("2fa", true).unwrap();

    assert_eq!(map.get_attr("content-type").unwrap(), "json");
    assert_eq!(map.get_attr("2fa").unwrap(), &true);
}

#[test]
fn test_attributes_as_trait_object() {
    let mut map = NestedMap::new();
    let attrs: &mut dyn Attributes = &mut map;
    attrs.set_attr("name", Value::from("api")).unwrap();
    assert!(attrs.has_attr("name"));
}

#[test]
fn test_index_sugar() {
    let map = service_config();
    assert_eq!(map["name"], "api");
    assert!(map["server"].as_nested().is_some());
}

#[test]
#[should_panic(expected = "key not found: missing")]
fn test_index_panics_on_missing_key() {
    let map = NestedMap::new();
    let _ = &map["missing"];
}
