//! `DecisionCore` — the pure rule engine at the center of the advisory
//! pipeline. Every function here takes a `FeatureSnapshot` and a
//! `Thresholds` and returns a value; none reads a clock, touches the
//! network, or retains state between calls. Identical inputs always
//! produce a byte-identical `DecisionDraft`.

mod completeness;
mod confidence;
mod direction;
mod direction_short;
mod permission;
mod priority;
mod quality;
mod regime;
mod risk;

#[cfg(test)]
mod tests_support;

use std::collections::BTreeMap;

use lta_config::Thresholds;
use lta_types::{Confidence, Decision, DecisionDraft, ExecutionPermission, FeatureSnapshot, MarketRegime, Timeframe, TradeQuality};

/// Both horizons' drafts for one tick, produced independently.
#[derive(Debug, Clone)]
pub struct DualDraft {
    pub short_term: DecisionDraft,
    pub medium_term: DecisionDraft,
}

/// Runs both horizons over the same snapshot. Failure on one horizon
/// (cold start, data gaps) never forces `NO_TRADE` on the other — each
/// call to `evaluate_single` is independent.
pub fn evaluate_dual(features: &FeatureSnapshot, thresholds: &Thresholds) -> DualDraft {
    DualDraft {
        short_term: evaluate_single(features, thresholds, Timeframe::ShortTerm),
        medium_term: evaluate_single(features, thresholds, Timeframe::MediumTerm),
    }
}

/// Runs Stages A-G for one horizon, then applies the hard-wired data
/// completeness policy on top.
pub fn evaluate_single(features: &FeatureSnapshot, thresholds: &Thresholds, timeframe: Timeframe) -> DecisionDraft {
    let (regime, mut tags) = regime::detect(features, &thresholds.market_regime);

    let risk_tags = risk::evaluate(features, regime, &thresholds.risk_exposure);
    if !risk_tags.is_empty() {
        tags.extend(risk_tags);
        let draft = DecisionDraft {
            decision: Decision::NoTrade,
            confidence: Confidence::Low,
            market_regime: regime,
            trade_quality: TradeQuality::Poor,
            execution_permission: ExecutionPermission::Deny,
            reason_tags: tags,
            key_metrics: key_metrics(features),
        };
        return completeness::apply(draft, features, timeframe);
    }

    let (quality, quality_tags) = quality::evaluate(features, regime, &thresholds.trade_quality);
    tags.extend(quality_tags);

    let (candidates, direction_tags) = match timeframe {
        Timeframe::ShortTerm => direction_short::evaluate(
            features,
            &thresholds.direction.range.short_term_opportunity,
            thresholds.dual_timeframe.short_term.required_signals,
        ),
        Timeframe::MediumTerm => direction::evaluate(features, regime, &thresholds.direction, &thresholds.risk_exposure),
    };
    tags.extend(direction_tags);

    let decision = priority::resolve(candidates, regime, features);
    let strength = priority::signal_strength(decision, regime, features, &thresholds.direction);
    let confidence = confidence::score(regime, quality, strength, &tags, &thresholds.confidence_scoring);
    let execution_permission = permission::from_tags(&tags);

    let draft = DecisionDraft {
        decision,
        confidence,
        market_regime: regime,
        trade_quality: quality,
        execution_permission,
        reason_tags: tags,
        key_metrics: key_metrics(features),
    };

    completeness::apply(draft, features, timeframe)
}

fn key_metrics(features: &FeatureSnapshot) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    let mut put = |name: &str, value: Option<f64>| {
        if let Some(v) = value {
            metrics.insert(name.to_string(), v);
        }
    };
    put("price_change_5m", features.price.price_change_5m);
    put("price_change_15m", features.price.price_change_15m);
    put("price_change_1h", features.price.price_change_1h);
    put("price_change_6h", features.price.price_change_6h);
    put("oi_change_1h", features.open_interest.oi_change_1h);
    put("oi_change_6h", features.open_interest.oi_change_6h);
    put("taker_imbalance_5m", features.taker_imbalance.taker_imbalance_5m);
    put("taker_imbalance_15m", features.taker_imbalance.taker_imbalance_15m);
    put("taker_imbalance_1h", features.taker_imbalance.taker_imbalance_1h);
    put("volume_ratio_15m", features.volume.volume_ratio_15m);
    put("funding_rate", features.funding.funding_rate);
    metrics
}
