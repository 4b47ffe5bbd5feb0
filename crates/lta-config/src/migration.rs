use std::sync::OnceLock;

/// Deprecated key → current key. Each distinct migration fires its warning
/// at most once per process lifetime, tracked in `MIGRATIONS_WARNED`.
const KEY_MIGRATIONS: &[(&str, &str)] = &[
    ("/trade_quality/buy_sell_imbalance", "/trade_quality/taker_imbalance"),
    ("/direction/trend/min_buy_sell_imbalance", "/direction/trend/long_imbalance"),
];

fn warned() -> &'static std::sync::Mutex<std::collections::HashSet<&'static str>> {
    static WARNED: OnceLock<std::sync::Mutex<std::collections::HashSet<&'static str>>> = OnceLock::new();
    WARNED.get_or_init(|| std::sync::Mutex::new(std::collections::HashSet::new()))
}

/// Apply key migrations to a parsed config document in place, renaming any
/// deprecated pointer found to its replacement. A given migration emits at
/// most one `tracing::warn!` for the whole process, not per call.
pub fn migrate_keys(doc: &mut serde_json::Value) {
    for (old_pointer, new_pointer) in KEY_MIGRATIONS {
        if let Some(value) = take_pointer(doc, old_pointer) {
            set_pointer(doc, new_pointer, value);
            if warned().lock().expect("migration warn registry poisoned").insert(old_pointer) {
                tracing::warn!(deprecated_key = *old_pointer, replacement = *new_pointer, "config key migrated");
            }
        }
    }
}

fn take_pointer(doc: &mut serde_json::Value, pointer: &str) -> Option<serde_json::Value> {
    let parts: Vec<&str> = pointer.split('/').filter(|s| !s.is_empty()).collect();
    let (last, parents) = parts.split_last()?;
    let mut cursor = doc;
    for part in parents {
        cursor = cursor.get_mut(part)?;
    }
    cursor.as_object_mut()?.remove(*last)
}

fn set_pointer(doc: &mut serde_json::Value, pointer: &str, value: serde_json::Value) {
    let parts: Vec<&str> = pointer.split('/').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = parts.split_last() else { return };
    let mut cursor = doc;
    for part in parents {
        if !cursor.is_object() {
            *cursor = serde_json::Value::Object(Default::default());
        }
        cursor = cursor
            .as_object_mut()
            .expect("checked above")
            .entry(part.to_string())
            .or_insert_with(|| serde_json::Value::Object(Default::default()));
    }
    if let Some(obj) = cursor.as_object_mut() {
        obj.insert(last.to_string(), value);
    }
}
