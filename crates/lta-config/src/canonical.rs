use serde_json::Value;
use sha2::{Digest, Sha256};

/// Recursively sort object keys and serialize to compact JSON, then hash
/// with SHA-256. Key order in the source YAML never affects the result.
pub fn hash_canonical(value: &Value) -> (String, String) {
    let sorted = sort_keys(value);
    let canonical_json = serde_json::to_string(&sorted).expect("canonical json serialization cannot fail");

    let mut hasher = Sha256::new();
    hasher.update(canonical_json.as_bytes());
    let hash = hex::encode(hasher.finalize());

    (canonical_json, hash)
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut sorted = serde_json::Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[&key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Deep-merge `src` into `dst`: objects merge key by key, arrays and
/// scalars are replaced wholesale. Later layers win.
pub fn deep_merge(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                match dst_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        dst_map.insert(key, value);
                    }
                }
            }
        }
        (dst_slot, src_value) => {
            *dst_slot = src_value;
        }
    }
}
