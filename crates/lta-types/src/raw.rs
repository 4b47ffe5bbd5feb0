use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discriminator carried in `raw._metadata.percentage_format`. Controls
/// whether `MetricsNormalizer` divides matched fields by 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageFormat {
    PercentPoint,
    Decimal,
}

/// Policy applied when `_metadata.percentage_format` is absent from a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFormatPolicy {
    Warn,
    FailFast,
    AssumePercentPoint,
}

/// The parsed form of the external "raw map" (§6): one tick of heterogeneous
/// per-symbol market data. `price`, `volume_24h`, `funding_rate`, `timestamp`
/// and `percentage_format` are the only fields every tick must carry;
/// everything else is optional and populates the short-/medium-term
/// channels when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTick {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub percentage_format: Option<PercentageFormat>,

    // Core — required for any evaluation at all (§4.6 data completeness policy).
    pub price: Option<f64>,
    pub volume_24h: Option<f64>,
    pub funding_rate: Option<f64>,

    // Price-change family (subject to §4.2 normalization).
    pub price_change_5m: Option<f64>,
    pub price_change_15m: Option<f64>,
    pub price_change_1h: Option<f64>,
    pub price_change_6h: Option<f64>,

    // Open-interest family (subject to §4.2 normalization).
    pub oi_change_5m: Option<f64>,
    pub oi_change_15m: Option<f64>,
    pub oi_change_1h: Option<f64>,
    pub oi_change_6h: Option<f64>,

    // Already-windowed ratios, not subject to percent-point conversion.
    pub taker_imbalance_5m: Option<f64>,
    pub taker_imbalance_15m: Option<f64>,
    pub taker_imbalance_1h: Option<f64>,
    pub volume_1h: Option<f64>,
    pub volume_ratio_5m: Option<f64>,
    pub volume_ratio_15m: Option<f64>,

    pub funding_rate_prev: Option<f64>,
}

impl RawTick {
    /// A tick with only the required core fields set; all else absent.
    /// Useful for building up fixtures without naming every field.
    pub fn core(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        price: f64,
        volume_24h: f64,
        funding_rate: f64,
        percentage_format: PercentageFormat,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            percentage_format: Some(percentage_format),
            price: Some(price),
            volume_24h: Some(volume_24h),
            funding_rate: Some(funding_rate),
            price_change_5m: None,
            price_change_15m: None,
            price_change_1h: None,
            price_change_6h: None,
            oi_change_5m: None,
            oi_change_15m: None,
            oi_change_1h: None,
            oi_change_6h: None,
            taker_imbalance_5m: None,
            taker_imbalance_15m: None,
            taker_imbalance_1h: None,
            volume_1h: None,
            volume_ratio_5m: None,
            volume_ratio_15m: None,
            funding_rate_prev: None,
        }
    }
}
