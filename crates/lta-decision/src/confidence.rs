use lta_config::ConfidenceScoringThresholds;
use lta_types::{Confidence, MarketRegime, ReasonTag, TradeQuality};

/// Stage F — Confidence. A base tier from `(regime, quality)`, bumped one
/// step when the triggering signal clears its threshold by a wide margin,
/// then clamped by every applicable cap. The final value is never above
/// any cap, regardless of how strong the base signal was.
pub fn score(
    regime: MarketRegime,
    quality: TradeQuality,
    signal_strength: f64,
    tags: &[ReasonTag],
    thresholds: &ConfidenceScoringThresholds,
) -> Confidence {
    let mut confidence = base(regime, quality);
    if signal_strength > 1.5 {
        confidence = confidence.step_up();
    }

    let mut ceiling = Confidence::Ultra;

    if quality == TradeQuality::Uncertain {
        let cap = if thresholds.caps.hybrid_mode {
            thresholds.caps.uncertain_quality_hybrid
        } else {
            thresholds.caps.uncertain_quality_default
        };
        ceiling = ceiling.min(cap);
    }

    for tag in tags {
        if let Some(cap) = thresholds.tag_caps.get(tag) {
            ceiling = ceiling.min(*cap);
        }
    }

    if tags.contains(&ReasonTag::FundingDowngrade) {
        ceiling = ceiling.step_down_by(thresholds.caps.funding_downgrade_steps);
    }

    confidence.min(ceiling)
}

fn base(regime: MarketRegime, quality: TradeQuality) -> Confidence {
    match (regime, quality) {
        (MarketRegime::Extreme, _) => Confidence::Low,
        (MarketRegime::Trend, TradeQuality::Good) => Confidence::High,
        (MarketRegime::Trend, TradeQuality::Uncertain) => Confidence::Medium,
        (MarketRegime::Trend, TradeQuality::Poor) => Confidence::Low,
        (MarketRegime::Range, TradeQuality::Good) => Confidence::Medium,
        (MarketRegime::Range, TradeQuality::Uncertain) => Confidence::Low,
        (MarketRegime::Range, TradeQuality::Poor) => Confidence::Low,
    }
}
