use lta_types::{FeatureSnapshot, MarketRegime, ReasonTag, TradeQuality};

use lta_config::TradeQualityThresholds;

/// Stage C — Trade Quality. Conditions are independent; all that fire
/// contribute their tag, and the final tier is the worst one reached
/// (`POOR` > `UNCERTAIN` > `GOOD`). `range_weak` only applies in `RANGE`.
pub fn evaluate(
    features: &FeatureSnapshot,
    regime: MarketRegime,
    thresholds: &TradeQualityThresholds,
) -> (TradeQuality, Vec<ReasonTag>) {
    let mut tags = Vec::new();
    let mut quality = TradeQuality::Good;
    let mut downgrade = |q: &mut TradeQuality, to: TradeQuality| {
        if worse(to, *q) {
            *q = to;
        }
    };

    if let (Some(imbalance), Some(volume_1h), Some(volume_24h)) =
        (features.taker_imbalance.taker_imbalance_1h, features.volume.volume_1h, features.volume.volume_24h)
    {
        let average_hourly = volume_24h / 24.0;
        if imbalance.abs() > thresholds.absorption.imbalance && volume_1h < thresholds.absorption.volume_ratio * average_hourly {
            tags.push(ReasonTag::AbsorptionRisk);
            downgrade(&mut quality, TradeQuality::Poor);
        }
    }

    if let (Some(funding), Some(funding_prev)) = (features.funding.funding_rate, features.funding.funding_rate_prev) {
        if (funding - funding_prev).abs() > thresholds.noise.funding_volatility && funding.abs() < thresholds.noise.funding_abs {
            tags.push(ReasonTag::NoisyMarket);
            downgrade(&mut quality, TradeQuality::Uncertain);
        }
    }

    if let (Some(imbalance), Some(price_change_1h)) =
        (features.taker_imbalance.taker_imbalance_1h, features.price.price_change_1h)
    {
        if imbalance.abs() > thresholds.rotation.imbalance && price_change_1h.abs() < thresholds.rotation.price_change {
            tags.push(ReasonTag::RotationRisk);
            downgrade(&mut quality, TradeQuality::Uncertain);
        }
    }

    if regime == MarketRegime::Range {
        if let Some(price_change_1h) = features.price.price_change_1h {
            if price_change_1h.abs() < thresholds.range_weak.price_change {
                tags.push(ReasonTag::RangeWeak);
                downgrade(&mut quality, TradeQuality::Poor);
            }
        }
    }

    (quality, tags)
}

fn worse(candidate: TradeQuality, current: TradeQuality) -> bool {
    rank(candidate) > rank(current)
}

fn rank(quality: TradeQuality) -> u8 {
    match quality {
        TradeQuality::Good => 0,
        TradeQuality::Uncertain => 1,
        TradeQuality::Poor => 2,
    }
}
