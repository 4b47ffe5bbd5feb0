use lta_config::RiskExposureThresholds;
use lta_types::{FeatureSnapshot, MarketRegime, ReasonTag};

/// Stage B — Risk Exposure Evaluation. Any tag returned here vetoes the
/// draft outright: the caller short-circuits to `(NO_TRADE, LOW, DENY)`
/// without reaching Stage C onward.
pub fn evaluate(features: &FeatureSnapshot, regime: MarketRegime, thresholds: &RiskExposureThresholds) -> Vec<ReasonTag> {
    let mut tags = Vec::new();

    if regime == MarketRegime::Extreme {
        tags.push(ReasonTag::ExtremeRegime);
    }

    if let (Some(pc_1h), Some(oi_1h)) = (features.price.price_change_1h, features.open_interest.oi_change_1h) {
        if pc_1h <= -thresholds.liquidation.price_change && oi_1h <= -thresholds.liquidation.oi_drop {
            tags.push(ReasonTag::LiquidationPhase);
        }
    }

    if let (Some(funding), Some(oi_6h)) = (features.funding.funding_rate, features.open_interest.oi_change_6h) {
        if funding.abs() > thresholds.crowding.funding_abs && oi_6h > thresholds.crowding.oi_growth {
            tags.push(ReasonTag::CrowdingRisk);
        }
    }

    if let Some(ratio) = features.volume.volume_ratio_15m.or(features.volume.volume_ratio_5m) {
        if ratio > thresholds.extreme_volume.volume_ratio {
            tags.push(ReasonTag::ExtremeVolume);
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use lta_config::{CrowdingThresholds, ExtremeVolumeThresholds, LiquidationThresholds};

    fn thresholds() -> RiskExposureThresholds {
        RiskExposureThresholds {
            liquidation: LiquidationThresholds { price_change: 0.05, oi_drop: 0.03 },
            crowding: CrowdingThresholds { funding_abs: 0.002, oi_growth: 0.10 },
            extreme_volume: ExtremeVolumeThresholds { volume_ratio: 5.0 },
        }
    }

    #[test]
    fn extreme_regime_is_always_tagged() {
        let f = crate::tests_support::empty_snapshot();
        let tags = evaluate(&f, MarketRegime::Extreme, &thresholds());
        assert_eq!(tags, vec![ReasonTag::ExtremeRegime]);
    }

    #[test]
    fn sharp_price_and_oi_drop_is_liquidation_phase() {
        let mut f = crate::tests_support::empty_snapshot();
        f.price.price_change_1h = Some(-0.06);
        f.open_interest.oi_change_1h = Some(-0.04);
        let tags = evaluate(&f, MarketRegime::Trend, &thresholds());
        assert_eq!(tags, vec![ReasonTag::LiquidationPhase]);
    }

    #[test]
    fn price_drop_without_oi_drop_is_not_liquidation() {
        let mut f = crate::tests_support::empty_snapshot();
        f.price.price_change_1h = Some(-0.06);
        f.open_interest.oi_change_1h = Some(0.01);
        let tags = evaluate(&f, MarketRegime::Trend, &thresholds());
        assert!(tags.is_empty());
    }

    #[test]
    fn extreme_funding_with_oi_growth_is_crowding_risk() {
        let mut f = crate::tests_support::empty_snapshot();
        f.funding.funding_rate = Some(0.003);
        f.open_interest.oi_change_6h = Some(0.12);
        let tags = evaluate(&f, MarketRegime::Trend, &thresholds());
        assert_eq!(tags, vec![ReasonTag::CrowdingRisk]);
    }

    #[test]
    fn volume_ratio_beyond_threshold_is_extreme_volume() {
        let mut f = crate::tests_support::empty_snapshot();
        f.volume.volume_ratio_15m = Some(6.0);
        let tags = evaluate(&f, MarketRegime::Trend, &thresholds());
        assert_eq!(tags, vec![ReasonTag::ExtremeVolume]);
    }

    #[test]
    fn multiple_vetoes_all_surface_together() {
        let mut f = crate::tests_support::empty_snapshot();
        f.funding.funding_rate = Some(0.003);
        f.open_interest.oi_change_6h = Some(0.12);
        f.volume.volume_ratio_15m = Some(6.0);
        let tags = evaluate(&f, MarketRegime::Trend, &thresholds());
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&ReasonTag::CrowdingRisk));
        assert!(tags.contains(&ReasonTag::ExtremeVolume));
    }

    #[test]
    fn clean_market_has_no_veto() {
        let mut f = crate::tests_support::empty_snapshot();
        f.price.price_change_1h = Some(0.01);
        f.open_interest.oi_change_1h = Some(0.01);
        let tags = evaluate(&f, MarketRegime::Range, &thresholds());
        assert!(tags.is_empty());
    }
}
