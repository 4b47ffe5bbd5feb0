use lta_config::{DirectionThresholds, RiskExposureThresholds};
use lta_types::{FeatureSnapshot, MarketRegime, ReasonTag};

/// One candidate side surfaced by Stage D, before Stage E picks between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Candidates {
    pub long: bool,
    pub short: bool,
}

/// Stage D (medium-term branch) — `TREND` requires imbalance, OI growth,
/// and price change to agree in sign and magnitude; `RANGE` falls back to
/// the short-term-opportunity predicate read off the 5m/15m fields.
/// Funding-rate downgrade is reported separately so confidence scoring can
/// act on it without coupling direction evaluation to the confidence table.
pub fn evaluate(
    features: &FeatureSnapshot,
    regime: MarketRegime,
    thresholds: &DirectionThresholds,
    risk: &RiskExposureThresholds,
) -> (Candidates, Vec<ReasonTag>) {
    let candidates = match regime {
        MarketRegime::Trend => trend_candidates(features, &thresholds.trend),
        MarketRegime::Range => range_candidates(features, &thresholds.range.short_term_opportunity),
        MarketRegime::Extreme => Candidates::default(),
    };

    let mut tags = Vec::new();
    if let Some(funding) = features.funding.funding_rate {
        if candidates.long && funding > risk.crowding.funding_abs {
            tags.push(ReasonTag::FundingDowngrade);
        }
        if candidates.short && funding < -risk.crowding.funding_abs {
            tags.push(ReasonTag::FundingDowngrade);
        }
    }

    (candidates, tags)
}

fn trend_candidates(features: &FeatureSnapshot, th: &lta_config::TrendDirectionThresholds) -> Candidates {
    let (imbalance, oi_growth, price_change) = match (
        features.taker_imbalance.taker_imbalance_1h,
        features.open_interest.oi_change_1h,
        features.price.price_change_1h,
    ) {
        (Some(i), Some(o), Some(p)) => (i, o, p),
        _ => return Candidates::default(),
    };

    let long = imbalance > th.long_imbalance && oi_growth > th.oi_growth && price_change > th.price_change;
    let short = imbalance < -th.long_imbalance && oi_growth > th.oi_growth && price_change < -th.price_change;
    Candidates { long, short }
}

fn range_candidates(features: &FeatureSnapshot, th: &lta_config::ShortTermOpportunityThresholds) -> Candidates {
    let (imbalance, price_change_15m, volume_ratio) = match (
        features.taker_imbalance.taker_imbalance_5m,
        features.price.price_change_15m,
        features.volume.volume_ratio_15m,
    ) {
        (Some(i), Some(p), Some(v)) => (i, p, v),
        _ => return Candidates::default(),
    };

    let long = imbalance > th.imbalance_5m && price_change_15m > th.price_change_15m && volume_ratio > th.volume_ratio_15m;
    let short = imbalance < -th.imbalance_5m && price_change_15m < -th.price_change_15m && volume_ratio > th.volume_ratio_15m;
    Candidates { long, short }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lta_config::{
        CrowdingThresholds, ExtremeVolumeThresholds, LiquidationThresholds, RangeDirectionThresholds,
        ShortTermOpportunityThresholds, TrendDirectionThresholds,
    };

    fn direction_thresholds() -> DirectionThresholds {
        DirectionThresholds {
            trend: TrendDirectionThresholds { long_imbalance: 0.3, oi_growth: 0.05, price_change: 0.02 },
            range: RangeDirectionThresholds {
                short_term_opportunity: ShortTermOpportunityThresholds {
                    imbalance_5m: 0.3,
                    price_change_15m: 0.01,
                    volume_ratio_15m: 1.5,
                },
            },
        }
    }

    fn risk_thresholds() -> RiskExposureThresholds {
        RiskExposureThresholds {
            liquidation: LiquidationThresholds { price_change: 0.05, oi_drop: 0.03 },
            crowding: CrowdingThresholds { funding_abs: 0.002, oi_growth: 0.10 },
            extreme_volume: ExtremeVolumeThresholds { volume_ratio: 5.0 },
        }
    }

    #[test]
    fn trend_long_requires_all_three_axes() {
        let mut f = crate::tests_support::empty_snapshot();
        f.taker_imbalance.taker_imbalance_1h = Some(0.4);
        f.open_interest.oi_change_1h = Some(0.06);
        f.price.price_change_1h = Some(0.03);
        let (candidates, _) = evaluate(&f, MarketRegime::Trend, &direction_thresholds(), &risk_thresholds());
        assert!(candidates.long);
        assert!(!candidates.short);
    }

    #[test]
    fn trend_missing_one_axis_yields_no_candidate() {
        let mut f = crate::tests_support::empty_snapshot();
        f.taker_imbalance.taker_imbalance_1h = Some(0.4);
        f.open_interest.oi_change_1h = Some(0.06);
        // price_change_1h left absent
        let (candidates, _) = evaluate(&f, MarketRegime::Trend, &direction_thresholds(), &risk_thresholds());
        assert_eq!(candidates, Candidates::default());
    }

    #[test]
    fn range_short_term_opportunity_long() {
        let mut f = crate::tests_support::empty_snapshot();
        f.taker_imbalance.taker_imbalance_5m = Some(0.4);
        f.price.price_change_15m = Some(0.02);
        f.volume.volume_ratio_15m = Some(2.0);
        let (candidates, _) = evaluate(&f, MarketRegime::Range, &direction_thresholds(), &risk_thresholds());
        assert!(candidates.long);
        assert!(!candidates.short);
    }

    #[test]
    fn funding_downgrade_tags_when_funding_opposes_a_long_candidate() {
        let mut f = crate::tests_support::empty_snapshot();
        f.taker_imbalance.taker_imbalance_1h = Some(0.4);
        f.open_interest.oi_change_1h = Some(0.06);
        f.price.price_change_1h = Some(0.03);
        f.funding.funding_rate = Some(0.003);
        let (candidates, tags) = evaluate(&f, MarketRegime::Trend, &direction_thresholds(), &risk_thresholds());
        assert!(candidates.long);
        assert_eq!(tags, vec![ReasonTag::FundingDowngrade]);
    }

    #[test]
    fn no_funding_downgrade_when_no_candidate_fires() {
        let mut f = crate::tests_support::empty_snapshot();
        f.funding.funding_rate = Some(0.003);
        let (candidates, tags) = evaluate(&f, MarketRegime::Trend, &direction_thresholds(), &risk_thresholds());
        assert_eq!(candidates, Candidates::default());
        assert!(tags.is_empty());
    }
}
