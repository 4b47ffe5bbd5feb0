use serde_json::Value;

use lta_types::ReasonTag;

use crate::error::ConfigError;

const REQUIRED_SECTIONS: &[&str] = &[
    "market_regime",
    "risk_exposure",
    "trade_quality",
    "direction",
    "confidence_scoring",
    "dual_timeframe",
    "normalization",
];

/// Number of axes in the short horizon's K-of-N rule (§4.6): 15m price
/// change, 15m imbalance, 15m volume ratio, 5m confirmation.
const SHORT_TERM_SIGNAL_AXES: u8 = 4;

const CONFIDENCE_LEVELS: &[&str] = &["low", "medium", "high", "ultra"];

fn pointer<'a>(doc: &'a Value, path: &str) -> Result<&'a Value, ConfigError> {
    doc.pointer(path).ok_or_else(|| ConfigError::MissingKey { pointer: path.to_string() })
}

fn as_f64(doc: &Value, path: &str) -> Result<f64, ConfigError> {
    pointer(doc, path)?.as_f64().ok_or_else(|| ConfigError::WrongType {
        pointer: path.to_string(),
        expected: "number".to_string(),
        found: describe(pointer(doc, path).expect("checked above")),
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

fn require_range(doc: &Value, path: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    let value = as_f64(doc, path)?;
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            pointer: path.to_string(),
            value: value.to_string(),
            constraint: format!("[{min}, {max}]"),
        });
    }
    Ok(())
}

/// Validate required sections, field types, ranges, and cross-references
/// against a merged, migrated config document. Called before typed
/// deserialization so a bad document fails with a precise diagnostic
/// rather than an opaque serde error.
pub fn validate(doc: &Value) -> Result<(), ConfigError> {
    for section in REQUIRED_SECTIONS {
        pointer(doc, &format!("/{section}"))?;
    }

    require_range(doc, "/market_regime/extreme_price_change_1h", 0.0, 5.0)?;
    require_range(doc, "/market_regime/trend_price_change_6h", 0.0, 5.0)?;

    require_range(doc, "/risk_exposure/liquidation/price_change", 0.0, 1.0)?;
    require_range(doc, "/risk_exposure/liquidation/oi_drop", 0.0, 1.0)?;
    require_range(doc, "/risk_exposure/crowding/funding_abs", 0.0, 1.0)?;
    require_range(doc, "/risk_exposure/extreme_volume/volume_ratio", 0.0, 100.0)?;

    require_range(doc, "/trade_quality/absorption/imbalance", 0.0, 1.0)?;
    require_range(doc, "/trade_quality/absorption/volume_ratio", 0.0, 1.0)?;
    require_range(doc, "/trade_quality/noise/funding_abs", 0.0, 1.0)?;

    require_range(doc, "/direction/trend/long_imbalance", 0.0, 1.0)?;

    let required_signals = pointer(doc, "/dual_timeframe/short_term/required_signals")?
        .as_u64()
        .ok_or_else(|| ConfigError::WrongType {
            pointer: "/dual_timeframe/short_term/required_signals".to_string(),
            expected: "integer".to_string(),
            found: describe(pointer(doc, "/dual_timeframe/short_term/required_signals").expect("checked above")),
        })? as u8;
    if required_signals < 1 || required_signals > SHORT_TERM_SIGNAL_AXES {
        return Err(ConfigError::RequiredSignalsOutOfRange {
            value: required_signals,
            max: SHORT_TERM_SIGNAL_AXES,
        });
    }

    if let Some(tag_caps) = doc.pointer("/confidence_scoring/tag_caps").and_then(Value::as_object) {
        for (tag_name, level) in tag_caps {
            if ReasonTag::from_name(tag_name).is_none() {
                return Err(ConfigError::UnknownReasonTag {
                    pointer: "/confidence_scoring/tag_caps".to_string(),
                    tag: tag_name.clone(),
                });
            }
            let level_str = level.as_str().unwrap_or_default();
            if !CONFIDENCE_LEVELS.contains(&level_str) {
                return Err(ConfigError::UnknownConfidence {
                    pointer: format!("/confidence_scoring/tag_caps/{tag_name}"),
                    level: level_str.to_string(),
                });
            }
        }
    }

    for caps_field in ["uncertain_quality_hybrid", "uncertain_quality_default"] {
        let path = format!("/confidence_scoring/caps/{caps_field}");
        let level = pointer(doc, &path)?.as_str().ok_or_else(|| ConfigError::WrongType {
            pointer: path.clone(),
            expected: "string".to_string(),
            found: describe(pointer(doc, &path).expect("checked above")),
        })?;
        if !CONFIDENCE_LEVELS.contains(&level) {
            return Err(ConfigError::UnknownConfidence { pointer: path, level: level.to_string() });
        }
    }

    Ok(())
}
