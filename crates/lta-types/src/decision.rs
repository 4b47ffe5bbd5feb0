use serde::{Deserialize, Serialize};

/// The engine's verdict for one horizon. Never an order — strictly advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Long,
    Short,
    NoTrade,
}

/// Ordered confidence tier. `LOW < MEDIUM < HIGH < ULTRA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Ultra,
}

impl Confidence {
    /// Step down by one tier, saturating at `Low`.
    pub fn step_down(self) -> Self {
        match self {
            Confidence::Ultra => Confidence::High,
            Confidence::High => Confidence::Medium,
            Confidence::Medium => Confidence::Low,
            Confidence::Low => Confidence::Low,
        }
    }

    /// Step up by one tier, saturating at `Ultra`.
    pub fn step_up(self) -> Self {
        match self {
            Confidence::Low => Confidence::Medium,
            Confidence::Medium => Confidence::High,
            Confidence::High => Confidence::Ultra,
            Confidence::Ultra => Confidence::Ultra,
        }
    }

    /// Step down `steps` tiers, saturating at `Low`.
    pub fn step_down_by(self, steps: u8) -> Self {
        let mut c = self;
        for _ in 0..steps {
            c = c.step_down();
        }
        c
    }
}

/// Coarse market classification used to select rule sub-branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    Trend,
    Range,
    Extreme,
}

/// Quality tier assigned to the current setup, independent of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeQuality {
    Good,
    Uncertain,
    Poor,
}

/// Policy-level permission, distinct from the gate's `executable` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPermission {
    Allow,
    AllowReduced,
    Deny,
}

impl ExecutionPermission {
    /// Lower permission by one notch: `Allow -> AllowReduced`, anything else unchanged.
    pub fn reduce(self) -> Self {
        match self {
            ExecutionPermission::Allow => ExecutionPermission::AllowReduced,
            other => other,
        }
    }

    pub fn at_least_reduced(self) -> Self {
        match self {
            ExecutionPermission::Allow => ExecutionPermission::AllowReduced,
            ExecutionPermission::AllowReduced => ExecutionPermission::AllowReduced,
            ExecutionPermission::Deny => ExecutionPermission::Deny,
        }
    }
}

/// One of the two independent evaluation tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    ShortTerm,
    MediumTerm,
}

impl Timeframe {
    pub fn name(&self) -> &'static str {
        match self {
            Timeframe::ShortTerm => "short_term",
            Timeframe::MediumTerm => "medium_term",
        }
    }
}
