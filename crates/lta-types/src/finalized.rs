use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decision::{Confidence, Decision, ExecutionPermission, MarketRegime, Timeframe, TradeQuality};
use crate::features::Metadata;
use crate::reason::ReasonTag;

/// Pure output of `DecisionCore` for one horizon. Contains no time- or
/// state-derived field — identical `(FeatureSnapshot, Thresholds)` inputs
/// always produce a byte-identical draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDraft {
    pub decision: Decision,
    pub confidence: Confidence,
    pub market_regime: MarketRegime,
    pub trade_quality: TradeQuality,
    pub execution_permission: ExecutionPermission,
    pub reason_tags: Vec<ReasonTag>,
    pub key_metrics: BTreeMap<String, f64>,
}

impl DecisionDraft {
    pub fn has_tag(&self, tag: ReasonTag) -> bool {
        self.reason_tags.contains(&tag)
    }
}

/// The gate's audit log for one horizon: why `executable` is what it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyControl {
    pub is_blocked: bool,
    pub block_reason: Option<String>,
    pub is_cooling: bool,
    pub min_interval_violated: bool,
    pub added_tags: Vec<ReasonTag>,
}

/// A draft plus the gate's timing verdict. The gate never rewrites
/// `decision`, `confidence`, `execution_permission`, `trade_quality`, or
/// `market_regime` — a blocked signal remains fully inspectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionFinal {
    pub timeframe: Timeframe,
    pub decision: Decision,
    pub confidence: Confidence,
    pub market_regime: MarketRegime,
    pub trade_quality: TradeQuality,
    pub execution_permission: ExecutionPermission,
    pub reason_tags: Vec<ReasonTag>,
    pub key_metrics: BTreeMap<String, f64>,
    pub executable: bool,
    pub frequency_control: FrequencyControl,
}

impl DecisionFinal {
    /// Final executability rule (§4.7): permission must clear regardless of
    /// decision — a denied `NO_TRADE` (data gap, Stage-B veto) is not
    /// executable. Timing only matters for `Long`/`Short`.
    pub fn compute_executable(
        decision: Decision,
        execution_permission: ExecutionPermission,
        is_cooling: bool,
        min_interval_violated: bool,
    ) -> bool {
        execution_permission != ExecutionPermission::Deny
            && (decision == Decision::NoTrade || (!is_cooling && !min_interval_violated))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignmentType {
    BothLong,
    BothShort,
    BothNoTrade,
    ConflictLongShort,
    ConflictShortLong,
    PartialLong,
    PartialShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    NoTrade,
    FollowMediumTerm,
    FollowShortTerm,
    FollowHigherConfidence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentAnalysis {
    pub alignment_type: AlignmentType,
    pub is_aligned: bool,
    pub has_conflict: bool,
    pub conflict_resolution: Option<ConflictResolution>,
    pub recommended_action: Decision,
    pub recommended_confidence: Option<Confidence>,
    pub recommendation_notes: String,
}

/// The engine façade's per-tick output (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DualTimeframeResult {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub short_term: DecisionFinal,
    pub medium_term: DecisionFinal,
    pub alignment: AlignmentAnalysis,
    pub global_risk_tags: Vec<ReasonTag>,
    pub risk_exposure_allowed: bool,
    pub thresholds_version: String,
    pub feature_metadata: Metadata,
}
