use std::collections::BTreeMap;

use lta_alignment::analyze;
use lta_types::{
    AlignmentType, Confidence, ConflictResolution, Decision, DecisionFinal, ExecutionPermission, FrequencyControl, MarketRegime,
    Timeframe, TradeQuality,
};

fn final_decision(timeframe: Timeframe, decision: Decision) -> DecisionFinal {
    DecisionFinal {
        timeframe,
        decision,
        confidence: Confidence::Medium,
        market_regime: MarketRegime::Trend,
        trade_quality: TradeQuality::Good,
        execution_permission: ExecutionPermission::Allow,
        reason_tags: Vec::new(),
        key_metrics: BTreeMap::new(),
        executable: true,
        frequency_control: FrequencyControl::default(),
    }
}

/// Every `(short, medium)` pair maps to exactly one alignment type, and
/// `is_aligned`/`has_conflict` are mutually exclusive with each other and
/// consistent with that type.
#[test]
fn every_decision_pair_classifies_to_the_documented_alignment_type() {
    let cases = [
        (Decision::Long, Decision::Long, AlignmentType::BothLong),
        (Decision::Short, Decision::Short, AlignmentType::BothShort),
        (Decision::NoTrade, Decision::NoTrade, AlignmentType::BothNoTrade),
        (Decision::Long, Decision::Short, AlignmentType::ConflictLongShort),
        (Decision::Short, Decision::Long, AlignmentType::ConflictShortLong),
        (Decision::Long, Decision::NoTrade, AlignmentType::PartialLong),
        (Decision::NoTrade, Decision::Long, AlignmentType::PartialLong),
        (Decision::Short, Decision::NoTrade, AlignmentType::PartialShort),
        (Decision::NoTrade, Decision::Short, AlignmentType::PartialShort),
    ];

    for (short_decision, medium_decision, expected) in cases {
        let short = final_decision(Timeframe::ShortTerm, short_decision);
        let medium = final_decision(Timeframe::MediumTerm, medium_decision);
        let analysis = analyze(&short, &medium, ConflictResolution::FollowHigherConfidence);

        assert_eq!(analysis.alignment_type, expected, "{short_decision:?}/{medium_decision:?}");
        assert!(!(analysis.is_aligned && analysis.has_conflict), "{short_decision:?}/{medium_decision:?}");
    }
}

/// A direct long/short conflict under the `NO_TRADE` policy always stands
/// down, regardless of how confident either horizon was individually.
#[test]
fn conflicting_horizons_under_no_trade_policy_always_stand_down() {
    let mut short = final_decision(Timeframe::ShortTerm, Decision::Long);
    short.confidence = Confidence::Ultra;
    let mut medium = final_decision(Timeframe::MediumTerm, Decision::Short);
    medium.confidence = Confidence::Ultra;

    let analysis = analyze(&short, &medium, ConflictResolution::NoTrade);

    assert!(analysis.has_conflict);
    assert_eq!(analysis.recommended_action, Decision::NoTrade);
    assert_eq!(analysis.recommended_confidence, None);
}
