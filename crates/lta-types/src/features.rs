use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price-family fields. All changes are signed decimals (0.05 = 5%).
/// A missing field is explicitly `None`, never 0 — see `FeatureSnapshot`
/// module docs and the "no zero-impersonation" testable property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub current_price: Option<f64>,
    pub price_change_5m: Option<f64>,
    pub price_change_15m: Option<f64>,
    pub price_change_1h: Option<f64>,
    pub price_change_6h: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenInterest {
    pub oi_change_5m: Option<f64>,
    pub oi_change_15m: Option<f64>,
    pub oi_change_1h: Option<f64>,
    pub oi_change_6h: Option<f64>,
}

/// Taker buy/sell imbalance in `[-1, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TakerImbalance {
    pub taker_imbalance_5m: Option<f64>,
    pub taker_imbalance_15m: Option<f64>,
    pub taker_imbalance_1h: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub volume_1h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub volume_ratio_5m: Option<f64>,
    pub volume_ratio_15m: Option<f64>,
}

/// Funding rate and its immediately preceding value, used to gauge the
/// volatility of the funding series (current vs. previous delta).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    pub funding_rate: Option<f64>,
    pub funding_rate_prev: Option<f64>,
}

/// All declared lookback windows, used for `missing_windows` and coverage reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    Min5,
    Min15,
    Hour1,
    Hour6,
    Hour24,
}

impl Window {
    pub fn name(&self) -> &'static str {
        match self {
            Window::Min5 => "5m",
            Window::Min15 => "15m",
            Window::Hour1 => "1h",
            Window::Hour6 => "6h",
            Window::Hour24 => "24h",
        }
    }
}

/// Per-window floor-lookup summary: whether the value could be resolved
/// within tolerance, and whether the snapshot is evaluable on each horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub short_evaluable: bool,
    pub medium_evaluable: bool,
    pub missing_windows: BTreeSet<Window>,
    pub lookback_gap_seconds: std::collections::BTreeMap<Window, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub feature_version: String,
    pub generated_at: DateTime<Utc>,
    pub source_timestamp: DateTime<Utc>,
    pub symbol: String,
}

/// Immutable, single-tick value object combining a raw snapshot, a cache
/// lookback, and normalization into one strongly-typed record. Created on
/// every tick and discarded after one decision — never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub price: Price,
    pub open_interest: OpenInterest,
    pub taker_imbalance: TakerImbalance,
    pub volume: Volume,
    pub funding: Funding,
    pub coverage: Coverage,
    pub metadata: Metadata,
}
