use dottable::{NestedMap, Value};
use serde_json::json;

/// Builds a map from a JSON object with auto-conversion on
pub fn map_from(json: serde_json::Value) -> NestedMap {
    NestedMap::try_from(json).expect("test input should be a JSON object")
}

/// Builds a map from a JSON object with auto-conversion off
pub fn raw_map_from(json: serde_json::Value) -> NestedMap {
    NestedMap::from_source(json, false).expect("test input should be a JSON object")
}

/// A small service configuration used across tests
pub fn service_config() -> NestedMap {
    map_from(json!({
        "name": "api",
        "server": {
            "host": "localhost",
            "port": 8080,
            "tls": {"enabled": false}
        },
        "workers": [{"id": 1}, {"id": 2}],
        "tags": ["web", "internal"]
    }))
}

/// Asserts that `value` is a merged list holding exactly `expected`, in order
pub fn assert_merged(value: &Value, expected: &[Value]) {
    match value {
        Value::Merged(merged) => assert_eq!(merged.as_slice(), expected),
        other => panic!("Expected merged values, got: {other:?}"),
    }
}
