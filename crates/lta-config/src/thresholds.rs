use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lta_types::{Confidence, ConflictResolution, MissingFormatPolicy, ReasonTag};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRegimeThresholds {
    pub extreme_price_change_1h: f64,
    pub trend_price_change_6h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationThresholds {
    pub price_change: f64,
    pub oi_drop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdingThresholds {
    pub funding_abs: f64,
    pub oi_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeVolumeThresholds {
    pub volume_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskExposureThresholds {
    pub liquidation: LiquidationThresholds,
    pub crowding: CrowdingThresholds,
    pub extreme_volume: ExtremeVolumeThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionThresholds {
    pub imbalance: f64,
    pub volume_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseThresholds {
    pub funding_volatility: f64,
    pub funding_abs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationThresholds {
    pub imbalance: f64,
    pub price_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeWeakThresholds {
    pub price_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeQualityThresholds {
    pub absorption: AbsorptionThresholds,
    pub noise: NoiseThresholds,
    pub rotation: RotationThresholds,
    pub range_weak: RangeWeakThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDirectionThresholds {
    pub long_imbalance: f64,
    pub oi_growth: f64,
    pub price_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermOpportunityThresholds {
    pub imbalance_5m: f64,
    pub price_change_15m: f64,
    pub volume_ratio_15m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDirectionThresholds {
    pub short_term_opportunity: ShortTermOpportunityThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionThresholds {
    pub trend: TrendDirectionThresholds,
    pub range: RangeDirectionThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceCaps {
    pub hybrid_mode: bool,
    pub uncertain_quality_hybrid: Confidence,
    pub uncertain_quality_default: Confidence,
    pub funding_downgrade_steps: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScoringThresholds {
    pub caps: ConfidenceCaps,
    pub tag_caps: BTreeMap<ReasonTag, Confidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermConfig {
    /// K in the short horizon's K-of-N rule, over the fixed axis set (15m
    /// price change, 15m imbalance, 15m volume ratio, 5m confirmation).
    pub required_signals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyControlThresholds {
    pub cooldown_short_secs: i64,
    pub cooldown_medium_secs: i64,
    pub min_interval_short_secs: i64,
    pub min_interval_medium_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualTimeframeThresholds {
    pub short_term: ShortTermConfig,
    pub conflict_resolution: ConflictResolution,
    pub frequency_control: FrequencyControlThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapToleranceSeconds {
    #[serde(rename = "5m")]
    pub min5: i64,
    #[serde(rename = "15m")]
    pub min15: i64,
    #[serde(rename = "1h")]
    pub hour1: i64,
    #[serde(rename = "6h")]
    pub hour6: i64,
}

impl Default for GapToleranceSeconds {
    fn default() -> Self {
        Self { min5: 90, min15: 300, hour1: 600, hour6: 1800 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickCacheThresholds {
    #[serde(default)]
    pub gap_tolerance_seconds: GapToleranceSeconds,
}

impl Default for TickCacheThresholds {
    fn default() -> Self {
        Self { gap_tolerance_seconds: GapToleranceSeconds::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationThresholds {
    pub missing_format_policy: MissingFormatPolicy,
}

/// The frozen, typed threshold object `ThresholdCompiler` produces. Every
/// field here was present, type-checked, and range-checked at compile
/// time; nothing downstream re-validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub market_regime: MarketRegimeThresholds,
    pub risk_exposure: RiskExposureThresholds,
    pub trade_quality: TradeQualityThresholds,
    pub direction: DirectionThresholds,
    pub confidence_scoring: ConfidenceScoringThresholds,
    pub dual_timeframe: DualTimeframeThresholds,
    #[serde(default)]
    pub tick_cache: TickCacheThresholds,
    pub normalization: NormalizationThresholds,
    /// SHA-256 over the canonical YAML encoding of the source, hex-encoded.
    /// Absent from the source document; `ThresholdCompiler` fills it in
    /// after validation.
    #[serde(default)]
    pub version: String,
}
