use std::fs;
use std::path::Path;

use crate::canonical::{deep_merge, hash_canonical};
use crate::error::ConfigError;
use crate::migration::migrate_keys;
use crate::thresholds::Thresholds;
use crate::validate::validate;

/// Parse, migrate, validate, and hash a threshold configuration into a
/// frozen typed object. Runs the pipeline over a single file.
pub fn compile_file(path: impl AsRef<Path>) -> Result<Thresholds, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path_str.clone(), source })?;
    compile_from_sources(&[&text])
}

/// Run the pipeline over an in-memory YAML document rather than a file.
/// What `compile_file` reduces to once the text is in hand; exposed
/// separately for callers (tests, fixtures) that already hold the source.
pub fn compile_str(source: &str) -> Result<Thresholds, ConfigError> {
    compile_from_sources(&[source])
}

/// Load and deep-merge several YAML layers (later layers win) before
/// running the rest of the pipeline. Additive deployment sugar over
/// `compile_file` for split base/override configs.
pub fn compile_layered(paths: &[impl AsRef<Path>]) -> Result<Thresholds, ConfigError> {
    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        texts.push(fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path_str, source })?);
    }
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    compile_from_sources(&refs)
}

pub(crate) fn compile_from_sources(sources: &[&str]) -> Result<Thresholds, ConfigError> {
    let mut merged = serde_json::Value::Object(Default::default());
    for (i, source) in sources.iter().enumerate() {
        let label = format!("layer[{i}]");
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|source| ConfigError::Parse { path: label.clone(), source })?;
        let json_value =
            serde_json::to_value(yaml_value).map_err(|source| ConfigError::Convert { path: label, source })?;
        deep_merge(&mut merged, json_value);
    }

    migrate_keys(&mut merged);
    validate(&merged)?;

    let (_, hash) = hash_canonical(&merged);

    let mut thresholds: Thresholds =
        serde_json::from_value(merged).map_err(|source| ConfigError::Shape { source })?;
    thresholds.version = hash;

    tracing::info!(version = thresholds.version.as_str(), "thresholds compiled");
    Ok(thresholds)
}
