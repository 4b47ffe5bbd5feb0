use lta_config::MarketRegimeThresholds;
use lta_types::{FeatureSnapshot, MarketRegime, ReasonTag};

/// Stage A — Market Regime Detection.
///
/// `EXTREME` takes priority over `TREND`; `price_change_6h` absent falls
/// back to `price_change_1h`, then `price_change_15m`, tagging
/// `mtf_degraded_to_1h` so the degradation is visible downstream.
pub fn detect(features: &FeatureSnapshot, thresholds: &MarketRegimeThresholds) -> (MarketRegime, Vec<ReasonTag>) {
    if let Some(pc_1h) = features.price.price_change_1h {
        if pc_1h.abs() > thresholds.extreme_price_change_1h {
            return (MarketRegime::Extreme, Vec::new());
        }
    }

    match features.price.price_change_6h {
        Some(pc_6h) => {
            let regime = if pc_6h.abs() > thresholds.trend_price_change_6h {
                MarketRegime::Trend
            } else {
                MarketRegime::Range
            };
            (regime, Vec::new())
        }
        None => {
            let fallback = features.price.price_change_1h.or(features.price.price_change_15m);
            let regime = match fallback {
                Some(pc) if pc.abs() > thresholds.trend_price_change_6h => MarketRegime::Trend,
                _ => MarketRegime::Range,
            };
            (regime, vec![ReasonTag::MtfDegradedTo1h])
        }
    }
}
