//! Engine façade (§4.9): wires `TickCache`, `MetricsNormalizer`,
//! `FeatureBuilder`, `DecisionCore`, `DecisionGate`, and `AlignmentAnalyzer`
//! into one per-tick entry point, `on_new_tick_dual`. This is the one
//! crate in the workspace that touches logging and catches failures
//! instead of propagating them — every subsystem it wires is pure or
//! returns a typed enum of its own.
//!
//! `on_new_tick_dual` never panics on a bad tick and never returns an
//! error: every foreseeable failure becomes a dual-`NO_TRADE`
//! `DualTimeframeResult` carrying an explanatory tag (§7).

mod catalog;
mod error;
mod trace;

pub use catalog::reason_tag_catalog;
pub use error::EngineError;
pub use trace::TraceSnapshot;

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use lta_config::Thresholds;
use lta_normalizer::WarnOnceRegistry;
use lta_state::StateStore;
use lta_tickcache::{TickCache, TickCacheMetrics};
use lta_types::{
    AlignmentAnalysis, Confidence, Decision, DecisionDraft, DecisionFinal, DualTimeframeResult, MarketRegime,
    RawTick, ReasonTag, Timeframe, TradeQuality,
};

use trace::TraceStore;

/// Added on top of the 6h window length when sizing `TickCache` retention,
/// so a late-running decision worker still finds a valid floor entry for
/// every configured window.
const CACHE_RETENTION_SAFETY_MARGIN_SECS: i64 = 600;
const SIX_HOUR_WINDOW_SECS: i64 = 21_600;

/// Symbols whose trace snapshot the engine retains at once (§6 "Pipeline
/// trace"). Oldest-tracked symbol is evicted past this.
const TRACE_STORE_CAPACITY: usize = 512;

/// Risk-exposure-level tags (Stage B), surfaced at the top of
/// `DualTimeframeResult` as `global_risk_tags` regardless of which horizon
/// raised them — a symbol-wide "is this market in a risk-off state at
/// all" signal, distinct from either horizon's own `reason_tags`.
const RISK_EXPOSURE_TAGS: &[ReasonTag] =
    &[ReasonTag::ExtremeRegime, ReasonTag::LiquidationPhase, ReasonTag::CrowdingRisk, ReasonTag::ExtremeVolume];

/// Owns every shared resource for one running instance: the tick cache,
/// the current thresholds (swappable behind a lock on reload), and the
/// frequency-control state store. Safe to share across worker threads —
/// `on_new_tick_dual` takes `&self`.
pub struct Engine {
    cache: TickCache<RawTick>,
    warn_registry: WarnOnceRegistry,
    thresholds: RwLock<Arc<Thresholds>>,
    state: Arc<dyn StateStore>,
    traces: TraceStore,
}

impl Engine {
    pub fn new(thresholds: Thresholds, state: Arc<dyn StateStore>) -> Self {
        let retention_secs =
            thresholds.tick_cache.gap_tolerance_seconds.hour6 + SIX_HOUR_WINDOW_SECS + CACHE_RETENTION_SAFETY_MARGIN_SECS;
        Self {
            cache: TickCache::new(chrono::Duration::seconds(retention_secs)),
            warn_registry: WarnOnceRegistry::new(),
            thresholds: RwLock::new(Arc::new(thresholds)),
            state,
            traces: TraceStore::new(TRACE_STORE_CAPACITY),
        }
    }

    /// The `version` hash of the thresholds currently in effect.
    pub fn thresholds_version(&self) -> String {
        self.current_thresholds().version.clone()
    }

    fn current_thresholds(&self) -> Arc<Thresholds> {
        Arc::clone(&self.thresholds.read().expect("thresholds lock poisoned"))
    }

    /// Cache-level counters (stale ticks, lookup gaps) for observability.
    pub fn cache_metrics(&self) -> TickCacheMetrics {
        self.cache.metrics()
    }

    /// The last retained normalization trace and coverage map for
    /// `symbol`, if any tick has been processed for it yet.
    pub fn last_trace(&self, symbol: &str) -> Option<TraceSnapshot> {
        self.traces.get(symbol)
    }

    /// Compile a fresh threshold document from `path` and publish it
    /// behind the atomic pointer. On failure the previous thresholds stay
    /// live — a bad reload is logged and rejected, never applied
    /// partially and never crashes the engine (§7).
    pub fn reload_thresholds_from_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        match lta_config::compile_file(path) {
            Ok(new) => {
                let version = new.version.clone();
                *self.thresholds.write().expect("thresholds lock poisoned") = Arc::new(new);
                tracing::info!(version = version.as_str(), "thresholds reloaded");
                Ok(())
            }
            Err(source) => {
                tracing::error!(path = %path.display(), error = %source, "threshold reload failed; keeping previous thresholds");
                Err(EngineError::Reload { source })
            }
        }
    }

    /// Process one tick end to end: cache it, build features, evaluate
    /// both horizons, apply frequency control, analyze alignment, and
    /// assemble the result. `raw.timestamp` is the authoritative clock for
    /// every time-sensitive step (cache lookback, frequency control) —
    /// the façade never reads the wall clock, so replay and live
    /// evaluation are numerically identical.
    pub fn on_new_tick_dual(&self, symbol: &str, raw: RawTick) -> DualTimeframeResult {
        let now = raw.timestamp;
        let thresholds = self.current_thresholds();

        if raw.price.is_none() || raw.volume_24h.is_none() || raw.funding_rate.is_none() {
            tracing::warn!(symbol, "raw tick missing required core fields; nothing cached");
            return self.invalid_input_result(symbol, now, &thresholds);
        }

        self.cache.insert(symbol, now, raw.clone());

        let features = match lta_features::build(&raw, &self.cache, &thresholds, &self.warn_registry, now) {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!(symbol, error = %err, "feature build failed; returning dual no_trade");
                return self.invalid_input_result(symbol, now, &thresholds);
            }
        };

        if let Ok((_, normalization_trace)) =
            lta_normalizer::normalize(&raw, thresholds.normalization.missing_format_policy, &self.warn_registry)
        {
            self.traces.record(symbol, normalization_trace, features.coverage.clone());
        }

        let draft = lta_decision::evaluate_dual(&features, &thresholds);

        let short_term = lta_gate::apply(
            &draft.short_term,
            symbol,
            Timeframe::ShortTerm,
            now,
            &thresholds.dual_timeframe.frequency_control,
            self.state.as_ref(),
        );
        let medium_term = lta_gate::apply(
            &draft.medium_term,
            symbol,
            Timeframe::MediumTerm,
            now,
            &thresholds.dual_timeframe.frequency_control,
            self.state.as_ref(),
        );

        let alignment = lta_alignment::analyze(&short_term, &medium_term, thresholds.dual_timeframe.conflict_resolution);
        let global_risk_tags = global_risk_tags(&short_term, &medium_term);
        let risk_exposure_allowed = global_risk_tags.is_empty();

        DualTimeframeResult {
            symbol: symbol.to_string(),
            timestamp: now,
            short_term,
            medium_term,
            alignment,
            global_risk_tags,
            risk_exposure_allowed,
            thresholds_version: thresholds.version.clone(),
            feature_metadata: features.metadata,
        }
    }

    /// The invariant failure-path result (§7): both horizons `NO_TRADE`,
    /// tagged `invalid_data`, nothing executable. Used whenever the tick
    /// cannot be evaluated at all, so nothing was cached for it.
    fn invalid_input_result(&self, symbol: &str, now: DateTime<Utc>, thresholds: &Thresholds) -> DualTimeframeResult {
        let short_term = invalid_final(Timeframe::ShortTerm);
        let medium_term = invalid_final(Timeframe::MediumTerm);
        let alignment = lta_alignment::analyze(&short_term, &medium_term, thresholds.dual_timeframe.conflict_resolution);

        DualTimeframeResult {
            symbol: symbol.to_string(),
            timestamp: now,
            short_term,
            medium_term,
            alignment,
            global_risk_tags: Vec::new(),
            risk_exposure_allowed: true,
            thresholds_version: thresholds.version.clone(),
            feature_metadata: lta_types::Metadata {
                feature_version: lta_features::FEATURE_VERSION.to_string(),
                generated_at: now,
                source_timestamp: now,
                symbol: symbol.to_string(),
            },
        }
    }
}

fn invalid_final(timeframe: Timeframe) -> DecisionFinal {
    let draft = DecisionDraft {
        decision: Decision::NoTrade,
        confidence: Confidence::Low,
        market_regime: MarketRegime::Range,
        trade_quality: TradeQuality::Poor,
        execution_permission: lta_types::ExecutionPermission::Deny,
        reason_tags: vec![ReasonTag::InvalidData],
        key_metrics: Default::default(),
    };
    DecisionFinal {
        timeframe,
        decision: draft.decision,
        confidence: draft.confidence,
        market_regime: draft.market_regime,
        trade_quality: draft.trade_quality,
        execution_permission: draft.execution_permission,
        reason_tags: draft.reason_tags,
        key_metrics: draft.key_metrics,
        executable: false,
        frequency_control: Default::default(),
    }
}

fn global_risk_tags(short: &DecisionFinal, medium: &DecisionFinal) -> Vec<ReasonTag> {
    RISK_EXPOSURE_TAGS
        .iter()
        .copied()
        .filter(|tag| short.reason_tags.contains(tag) || medium.reason_tags.contains(tag))
        .collect()
}

#[cfg(test)]
mod tests;
