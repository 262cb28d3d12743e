//! Field-by-field merging of settings tiers.
//!
//! Each tier is parsed into a `serde_json::Value` first; objects merge
//! recursively, everything else is replaced by the higher tier.

use serde_json::Value;

/// Merge `overlay` onto `base`, with `overlay` taking precedence.
///
/// - Objects merge key by key, recursively
/// - Arrays and scalars from `overlay` replace `base` wholesale
/// - A `null` in `overlay` leaves `base` untouched (the key was not set)
///
/// # Example
/// ```
/// use serde_json::json;
/// use contrib_bundle::config::deep_merge;
///
/// let defaults = json!({
///     "resources": { "extension": "json", "embedded": false },
///     "output": { "format": "markdown" }
/// });
/// let project = json!({ "resources": { "embedded": true } });
///
/// let merged = deep_merge(defaults, project);
/// assert_eq!(merged["resources"]["embedded"], json!(true));
/// assert_eq!(merged["resources"]["extension"], json!("json"));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge tiers in order, later tiers winning.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
