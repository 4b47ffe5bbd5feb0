use serde::{Deserialize, Serialize};

/// Closed-vocabulary, machine-readable tag attached to a decision. The sole
/// medium by which the engine explains quality, risk, and executability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    // Data completeness (§4.6 data completeness policy)
    InvalidData,
    DataGap5m,
    DataGap15m,
    DataGap1h,
    DataGap6h,
    DataIncompleteLtf,
    DataIncompleteMtf,
    MtfDegradedTo1h,

    // Stage B — risk exposure veto
    ExtremeRegime,
    LiquidationPhase,
    CrowdingRisk,
    ExtremeVolume,

    // Stage C — trade quality
    AbsorptionRisk,
    NoisyMarket,
    RotationRisk,
    RangeWeak,

    // Stage D — direction / funding
    StrongBuyPressure,
    StrongSellPressure,
    FundingDowngrade,

    // Gate — frequency control (§4.7)
    FrequencyCooling,
    MinIntervalViolated,
    DirectionFlip,
}

/// The executability contribution of a tag, used by Stage G to derive
/// `execution_permission` from the tag set alone (never from confidence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutabilityLevel {
    Block,
    Degrade,
    Allow,
}

impl ReasonTag {
    /// Stable machine name, matching the serialized (snake_case) form.
    pub fn name(&self) -> &'static str {
        match self {
            ReasonTag::InvalidData => "invalid_data",
            ReasonTag::DataGap5m => "data_gap_5m",
            ReasonTag::DataGap15m => "data_gap_15m",
            ReasonTag::DataGap1h => "data_gap_1h",
            ReasonTag::DataGap6h => "data_gap_6h",
            ReasonTag::DataIncompleteLtf => "data_incomplete_ltf",
            ReasonTag::DataIncompleteMtf => "data_incomplete_mtf",
            ReasonTag::MtfDegradedTo1h => "mtf_degraded_to_1h",
            ReasonTag::ExtremeRegime => "extreme_regime",
            ReasonTag::LiquidationPhase => "liquidation_phase",
            ReasonTag::CrowdingRisk => "crowding_risk",
            ReasonTag::ExtremeVolume => "extreme_volume",
            ReasonTag::AbsorptionRisk => "absorption_risk",
            ReasonTag::NoisyMarket => "noisy_market",
            ReasonTag::RotationRisk => "rotation_risk",
            ReasonTag::RangeWeak => "range_weak",
            ReasonTag::StrongBuyPressure => "strong_buy_pressure",
            ReasonTag::StrongSellPressure => "strong_sell_pressure",
            ReasonTag::FundingDowngrade => "funding_downgrade",
            ReasonTag::FrequencyCooling => "frequency_cooling",
            ReasonTag::MinIntervalViolated => "min_interval_violated",
            ReasonTag::DirectionFlip => "direction_flip",
        }
    }

    /// All tags, in declaration order — used to build the catalog and to
    /// validate `confidence_scoring.caps.tag_caps` keys at config-compile time.
    pub fn all() -> &'static [ReasonTag] {
        use ReasonTag::*;
        &[
            InvalidData,
            DataGap5m,
            DataGap15m,
            DataGap1h,
            DataGap6h,
            DataIncompleteLtf,
            DataIncompleteMtf,
            MtfDegradedTo1h,
            ExtremeRegime,
            LiquidationPhase,
            CrowdingRisk,
            ExtremeVolume,
            AbsorptionRisk,
            NoisyMarket,
            RotationRisk,
            RangeWeak,
            StrongBuyPressure,
            StrongSellPressure,
            FundingDowngrade,
            FrequencyCooling,
            MinIntervalViolated,
            DirectionFlip,
        ]
    }

    pub fn from_name(name: &str) -> Option<ReasonTag> {
        ReasonTag::all().iter().copied().find(|t| t.name() == name)
    }

    /// Fixed executability contribution (§4.6 Stage G). Not configurable —
    /// the tag-to-level mapping is part of the engine's contract, distinct
    /// from the confidence `tag_caps` table which *is* configurable.
    pub fn executability(&self) -> ExecutabilityLevel {
        use ExecutabilityLevel::*;
        use ReasonTag::*;
        match self {
            InvalidData | ExtremeRegime | LiquidationPhase | CrowdingRisk | ExtremeVolume
            | DataIncompleteLtf | DataIncompleteMtf => Block,

            MtfDegradedTo1h | DataGap5m | DataGap15m | DataGap1h | DataGap6h | AbsorptionRisk
            | NoisyMarket | RotationRisk | RangeWeak | FundingDowngrade | FrequencyCooling
            | MinIntervalViolated => Degrade,

            StrongBuyPressure | StrongSellPressure | DirectionFlip => Allow,
        }
    }

    /// Operator-facing explanation, used by `reason_tag_catalog()` (§6).
    pub fn human_explanation(&self) -> &'static str {
        match self {
            ReasonTag::InvalidData => "Required core fields were missing or unparseable; the tick could not be evaluated.",
            ReasonTag::DataGap5m => "The 5-minute lookback window had no floor entry within tolerance.",
            ReasonTag::DataGap15m => "The 15-minute lookback window had no floor entry within tolerance.",
            ReasonTag::DataGap1h => "The 1-hour lookback window had no floor entry within tolerance.",
            ReasonTag::DataGap6h => "The 6-hour lookback window had no floor entry within tolerance.",
            ReasonTag::DataIncompleteLtf => "Short-term optional fields were missing; the short horizon was not evaluable.",
            ReasonTag::DataIncompleteMtf => "1-hour fields were missing; the medium horizon was not evaluable.",
            ReasonTag::MtfDegradedTo1h => "The medium horizon was evaluated on 1h data only because 6h data was absent.",
            ReasonTag::ExtremeRegime => "Price action exceeded the extreme-regime threshold; all exposure is vetoed.",
            ReasonTag::LiquidationPhase => "Price and open interest both fell sharply, consistent with a liquidation cascade.",
            ReasonTag::CrowdingRisk => "Funding rate and open-interest growth indicate an overcrowded positioning.",
            ReasonTag::ExtremeVolume => "Volume ratio exceeded the extreme-volume threshold.",
            ReasonTag::AbsorptionRisk => "Large taker imbalance against thin realized volume suggests absorption by a counterparty.",
            ReasonTag::NoisyMarket => "Funding rate is volatile but not extreme; signal quality is uncertain.",
            ReasonTag::RotationRisk => "Price action is consistent with sector/asset rotation rather than a clean trend.",
            ReasonTag::RangeWeak => "Range-bound action lacks the conviction required for a clean range trade.",
            ReasonTag::StrongBuyPressure => "Multiple short-term axes confirmed strong buy-side pressure.",
            ReasonTag::StrongSellPressure => "Multiple short-term axes confirmed strong sell-side pressure.",
            ReasonTag::FundingDowngrade => "Funding rate is extreme in the signal direction; confidence was capped one step lower.",
            ReasonTag::FrequencyCooling => "The same direction was signaled too recently; repeat signal is cooling down.",
            ReasonTag::MinIntervalViolated => "A differing direction arrived before the minimum interval between signals elapsed.",
            ReasonTag::DirectionFlip => "Direction changed from the previously stored signal after the minimum interval elapsed.",
        }
    }
}

/// One entry of the reason-tag catalog exposed to UI consumers (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonTagInfo {
    pub executability_level: ExecutabilityLevel,
    pub human_explanation: String,
}
