//! Shared vocabulary for the Level-1 advisory engine.
//!
//! This crate holds data only: the decision/regime/tag enumerations, the
//! feature snapshot, and the draft/final/result value objects. No
//! evaluation logic and no I/O live here — every type is constructed,
//! compared, and serialized by its owning component.

pub mod decision;
pub mod features;
pub mod finalized;
pub mod raw;
pub mod reason;

pub use decision::{Confidence, Decision, ExecutionPermission, MarketRegime, Timeframe, TradeQuality};
pub use features::{
    Coverage, FeatureSnapshot, Funding, Metadata, OpenInterest, Price, TakerImbalance, Volume, Window,
};
pub use finalized::{
    AlignmentAnalysis, AlignmentType, ConflictResolution, DecisionDraft, DecisionFinal,
    DualTimeframeResult, FrequencyControl,
};
pub use raw::{MissingFormatPolicy, PercentageFormat, RawTick};
pub use reason::{ExecutabilityLevel, ReasonTag, ReasonTagInfo};
