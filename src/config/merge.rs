//! Deep merge for layered configuration.
//!
//! Higher tier values override lower tier values field by field. Arrays are
//! replaced, not concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively
/// - Any other overlay value replaces the base
/// - A null overlay keeps the base (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use task_store::config::deep_merge;
///
/// let base = json!({ "server": { "port": 8080, "host": "127.0.0.1" } });
/// let overlay = json!({ "server": { "port": 9000 } });
/// let merged = deep_merge(base, overlay);
/// assert_eq!(merged, json!({ "server": { "port": 9000, "host": "127.0.0.1" } }));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge values in order, later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
