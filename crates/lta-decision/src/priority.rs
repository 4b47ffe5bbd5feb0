use lta_config::DirectionThresholds;
use lta_types::{Decision, FeatureSnapshot, MarketRegime};

use crate::direction::Candidates;

/// Stage E — Decision Priority. Both candidates false is `NO_TRADE`;
/// exactly one true is that side; both true is a tie broken by regime —
/// `TREND` follows the 1h price-change sign, everything else follows the
/// nearest available taker-imbalance sign.
pub fn resolve(candidates: Candidates, regime: MarketRegime, features: &FeatureSnapshot) -> Decision {
    match (candidates.long, candidates.short) {
        (false, false) => Decision::NoTrade,
        (true, false) => Decision::Long,
        (false, true) => Decision::Short,
        (true, true) => tie_break(regime, features),
    }
}

fn tie_break(regime: MarketRegime, features: &FeatureSnapshot) -> Decision {
    match regime {
        MarketRegime::Trend => match features.price.price_change_1h {
            Some(pc) if pc >= 0.0 => Decision::Long,
            Some(_) => Decision::Short,
            None => Decision::NoTrade,
        },
        MarketRegime::Range | MarketRegime::Extreme => {
            match features.taker_imbalance.taker_imbalance_15m.or(features.taker_imbalance.taker_imbalance_5m) {
                Some(imbalance) if imbalance >= 0.0 => Decision::Long,
                Some(_) => Decision::Short,
                None => Decision::NoTrade,
            }
        }
    }
}

/// How far the deciding metric cleared its threshold, as a ratio. Used by
/// Stage F to bump confidence one tier when a signal is unusually strong.
/// `NO_TRADE` and missing inputs report a neutral `1.0`.
pub fn signal_strength(decision: Decision, regime: MarketRegime, features: &FeatureSnapshot, thresholds: &DirectionThresholds) -> f64 {
    if decision == Decision::NoTrade {
        return 1.0;
    }
    match regime {
        MarketRegime::Trend => features
            .price
            .price_change_1h
            .map(|pc| pc.abs() / thresholds.trend.price_change)
            .unwrap_or(1.0),
        MarketRegime::Range => features
            .price
            .price_change_15m
            .map(|pc| pc.abs() / thresholds.range.short_term_opportunity.price_change_15m)
            .unwrap_or(1.0),
        MarketRegime::Extreme => 1.0,
    }
}
