//! Converts percent-point inputs to decimal on a field-family regex and
//! records a normalization trace.
//!
//! The trace is attached to the pipeline record for the tick and is the
//! only permissible source of truth for scale diagnostics — nothing
//! downstream should re-derive "was this field converted?" by inspecting
//! magnitudes.

use std::sync::OnceLock;

use dashmap::DashSet;
use regex::Regex;
use serde::{Deserialize, Serialize};

use lta_types::{MissingFormatPolicy, PercentageFormat, RawTick};

fn price_change_family() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^price_change_\w+$").expect("valid regex"))
}

fn oi_change_family() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^oi_change_\w+$").expect("valid regex"))
}

/// A normalization pass failed the tick outright rather than degrading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// `percentage_format` was absent and the policy is `FailFast`.
    MissingFormat { symbol: String },
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeError::MissingFormat { symbol } => {
                write!(f, "{symbol}: missing _metadata.percentage_format under fail_fast policy")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// Record of what the normalizer actually did to one tick. The only
/// permissible source of truth for "was this field converted" — never
/// re-derive that by inspecting magnitudes downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationTrace {
    pub input_format: PercentageFormat,
    pub converted_fields: Vec<String>,
    pub skipped_fields: Vec<String>,
    pub failed_range_check: Vec<String>,
    pub policy_fired: Option<MissingFormatPolicy>,
}

/// Tracks which symbols have already received a missing-format warning, so
/// `Warn` emits at most one log line per symbol for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct WarnOnceRegistry {
    warned: DashSet<String>,
}

impl WarnOnceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time it is called for `symbol`, `false`
    /// on every call after.
    fn should_warn(&self, symbol: &str) -> bool {
        self.warned.insert(symbol.to_string())
    }
}

/// Every numeric field the raw schema carries. Classification into a
/// percentage family happens through the regexes above, not through this
/// list's order — a field merely needs to be enumerable so the normalizer
/// can report it as converted, skipped, or range-failed.
const NUMERIC_FIELDS: &[(&str, fn(&RawTick) -> Option<f64>)] = &[
    ("price_change_5m", |t| t.price_change_5m),
    ("price_change_15m", |t| t.price_change_15m),
    ("price_change_1h", |t| t.price_change_1h),
    ("price_change_6h", |t| t.price_change_6h),
    ("oi_change_5m", |t| t.oi_change_5m),
    ("oi_change_15m", |t| t.oi_change_15m),
    ("oi_change_1h", |t| t.oi_change_1h),
    ("oi_change_6h", |t| t.oi_change_6h),
    ("taker_imbalance_5m", |t| t.taker_imbalance_5m),
    ("taker_imbalance_15m", |t| t.taker_imbalance_15m),
    ("taker_imbalance_1h", |t| t.taker_imbalance_1h),
    ("volume_1h", |t| t.volume_1h),
    ("volume_ratio_5m", |t| t.volume_ratio_5m),
    ("volume_ratio_15m", |t| t.volume_ratio_15m),
    ("funding_rate_prev", |t| t.funding_rate_prev),
];

fn set_field(tick: &mut RawTick, name: &str, value: Option<f64>) {
    match name {
        "price_change_5m" => tick.price_change_5m = value,
        "price_change_15m" => tick.price_change_15m = value,
        "price_change_1h" => tick.price_change_1h = value,
        "price_change_6h" => tick.price_change_6h = value,
        "oi_change_5m" => tick.oi_change_5m = value,
        "oi_change_15m" => tick.oi_change_15m = value,
        "oi_change_1h" => tick.oi_change_1h = value,
        "oi_change_6h" => tick.oi_change_6h = value,
        _ => unreachable!("set_field called on a field normalize() never touches: {name}"),
    }
}

/// Convert a raw tick's percent-point fields to decimal and record a trace
/// of what happened. `registry` carries the one-time-per-symbol warning
/// state across calls; pass the same instance for the life of the process.
pub fn normalize(
    raw: &RawTick,
    policy: MissingFormatPolicy,
    registry: &WarnOnceRegistry,
) -> Result<(RawTick, NormalizationTrace), NormalizeError> {
    let (input_format, policy_fired) = match raw.percentage_format {
        Some(format) => (format, None),
        None => match policy {
            MissingFormatPolicy::Warn => {
                if registry.should_warn(&raw.symbol) {
                    tracing::warn!(
                        symbol = raw.symbol.as_str(),
                        "percentage_format missing; assuming percent_point"
                    );
                }
                (PercentageFormat::PercentPoint, Some(policy))
            }
            MissingFormatPolicy::FailFast => {
                return Err(NormalizeError::MissingFormat { symbol: raw.symbol.clone() });
            }
            MissingFormatPolicy::AssumePercentPoint => (PercentageFormat::PercentPoint, Some(policy)),
        },
    };

    let mut out = raw.clone();
    out.percentage_format = Some(input_format);

    let mut converted_fields = Vec::new();
    let mut skipped_fields = Vec::new();
    let mut failed_range_check = Vec::new();

    for (name, getter) in NUMERIC_FIELDS {
        let matches_family = price_change_family().is_match(name) || oi_change_family().is_match(name);
        if !matches_family {
            if getter(raw).is_some() {
                skipped_fields.push((*name).to_string());
            }
            continue;
        }
        let Some(value) = getter(raw) else {
            continue;
        };

        let converted = match input_format {
            PercentageFormat::PercentPoint => {
                converted_fields.push((*name).to_string());
                value / 100.0
            }
            PercentageFormat::Decimal => value,
        };

        if converted.abs() > 1.0 {
            failed_range_check.push((*name).to_string());
            set_field(&mut out, name, None);
        } else {
            set_field(&mut out, name, Some(converted));
        }
    }

    Ok((
        out,
        NormalizationTrace {
            input_format,
            converted_fields,
            skipped_fields,
            failed_range_check,
            policy_fired,
        },
    ))
}
