use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("failed to parse {path} as YAML: {source}")]
    Parse { path: String, #[source] source: serde_yaml::Error },

    #[error("failed to convert YAML to JSON for {path}: {source}")]
    Convert { path: String, #[source] source: serde_json::Error },

    #[error("missing required key {pointer}")]
    MissingKey { pointer: String },

    #[error("key {pointer} has the wrong type: expected {expected}, found {found}")]
    WrongType { pointer: String, expected: String, found: String },

    #[error("key {pointer} = {value} is out of its declared range ({constraint})")]
    OutOfRange { pointer: String, value: String, constraint: String },

    #[error("{pointer} references unknown reason tag {tag}")]
    UnknownReasonTag { pointer: String, tag: String },

    #[error("{pointer} references unknown confidence level {level}")]
    UnknownConfidence { pointer: String, level: String },

    #[error("dual_timeframe.short_term.required_signals = {value} must be in 1..={max}")]
    RequiredSignalsOutOfRange { value: u8, max: u8 },

    #[error("failed to deserialize the validated document into Thresholds: {source}")]
    Shape { #[source] source: serde_json::Error },
}
