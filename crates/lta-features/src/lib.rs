//! Combines a raw snapshot, a `TickCache` lookback, and `MetricsNormalizer`
//! output into one immutable `FeatureSnapshot` with a coverage report.
//!
//! A `FeatureSnapshot` is created on every tick, used for exactly one
//! decision, and discarded — nothing here is mutated in place.

use chrono::{DateTime, Utc};

use lta_config::Thresholds;
use lta_normalizer::{normalize, NormalizeError, WarnOnceRegistry};
use lta_tickcache::{TickCache, WindowSpec};
use lta_types::{
    Coverage, FeatureSnapshot, Funding, Metadata, OpenInterest, Price, RawTick, TakerImbalance,
    Volume, Window,
};

pub const FEATURE_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    InvalidData { reason: String },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::InvalidData { reason } => write!(f, "invalid tick data: {reason}"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<NormalizeError> for BuildError {
    fn from(err: NormalizeError) -> Self {
        BuildError::InvalidData { reason: err.to_string() }
    }
}

const WINDOW_TABLE: &[(Window, &str, i64)] =
    &[(Window::Min5, "5m", 300), (Window::Min15, "15m", 900), (Window::Hour1, "1h", 3600), (Window::Hour6, "6h", 21_600)];

fn window_specs(thresholds: &Thresholds) -> Vec<(Window, WindowSpec<'static>)> {
    let g = &thresholds.tick_cache.gap_tolerance_seconds;
    let tolerances = [g.min5, g.min15, g.hour1, g.hour6];
    WINDOW_TABLE
        .iter()
        .zip(tolerances)
        .map(|((window, name, lookback_seconds), tolerance)| {
            (*window, WindowSpec { name, lookback_seconds: *lookback_seconds, tolerance_seconds: tolerance })
        })
        .collect()
}

/// Combine `raw` with `cache`'s lookback and `MetricsNormalizer`'s output
/// into a `FeatureSnapshot`. The cache is consulted purely for per-window
/// coverage (is there a fresh-enough historical entry?) — the numeric
/// price/OI/funding fields themselves come straight from the normalized
/// current tick, never recomputed from a historical floor entry.
pub fn build(
    raw: &RawTick,
    cache: &TickCache<RawTick>,
    thresholds: &Thresholds,
    registry: &WarnOnceRegistry,
    now: DateTime<Utc>,
) -> Result<FeatureSnapshot, BuildError> {
    let (normalized, trace) = normalize(raw, thresholds.normalization.missing_format_policy, registry)?;
    if !trace.failed_range_check.is_empty() {
        tracing::debug!(
            symbol = raw.symbol.as_str(),
            fields = ?trace.failed_range_check,
            "fields failed normalization range check and were dropped"
        );
    }

    let specs = window_specs(thresholds);
    let spec_refs: Vec<WindowSpec<'_>> = specs.iter().map(|(_, s)| *s).collect();
    let resolved = cache.coverage(&raw.symbol, now, &spec_refs);

    let mut missing_windows = std::collections::BTreeSet::new();
    let mut lookback_gap_seconds = std::collections::BTreeMap::new();
    for (window, spec) in &specs {
        let result = &resolved[spec.name];
        if !result.valid {
            missing_windows.insert(*window);
        }
        if let Some(gap) = result.gap_seconds {
            lookback_gap_seconds.insert(*window, gap);
        }
    }

    let window_valid = |w: Window| !missing_windows.contains(&w);

    let short_evaluable = window_valid(Window::Min5)
        && window_valid(Window::Min15)
        && normalized.price_change_5m.is_some()
        && normalized.price_change_15m.is_some()
        && normalized.taker_imbalance_15m.is_some()
        && normalized.volume_ratio_15m.is_some();

    let medium_evaluable = window_valid(Window::Hour1)
        && normalized.price_change_1h.is_some()
        && normalized.oi_change_1h.is_some()
        && normalized.taker_imbalance_1h.is_some();

    let snapshot = FeatureSnapshot {
        price: Price {
            current_price: normalized.price,
            price_change_5m: normalized.price_change_5m,
            price_change_15m: normalized.price_change_15m,
            price_change_1h: normalized.price_change_1h,
            price_change_6h: normalized.price_change_6h,
        },
        open_interest: OpenInterest {
            oi_change_5m: normalized.oi_change_5m,
            oi_change_15m: normalized.oi_change_15m,
            oi_change_1h: normalized.oi_change_1h,
            oi_change_6h: normalized.oi_change_6h,
        },
        taker_imbalance: TakerImbalance {
            taker_imbalance_5m: normalized.taker_imbalance_5m,
            taker_imbalance_15m: normalized.taker_imbalance_15m,
            taker_imbalance_1h: normalized.taker_imbalance_1h,
        },
        volume: Volume {
            volume_1h: normalized.volume_1h,
            volume_24h: normalized.volume_24h,
            volume_ratio_5m: normalized.volume_ratio_5m,
            volume_ratio_15m: normalized.volume_ratio_15m,
        },
        funding: Funding { funding_rate: normalized.funding_rate, funding_rate_prev: normalized.funding_rate_prev },
        coverage: Coverage { short_evaluable, medium_evaluable, missing_windows, lookback_gap_seconds },
        metadata: Metadata {
            feature_version: FEATURE_VERSION.to_string(),
            generated_at: now,
            source_timestamp: raw.timestamp,
            symbol: raw.symbol.clone(),
        },
    };

    Ok(snapshot)
}
