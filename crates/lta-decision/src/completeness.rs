use std::collections::BTreeMap;

use lta_types::{Confidence, Decision, DecisionDraft, ExecutionPermission, FeatureSnapshot, ReasonTag, Timeframe, TradeQuality, Window};

/// Hard-wired data completeness policy, applied after the rest of
/// evaluation. Not configurable — every horizon degrades the same way
/// regardless of which thresholds are loaded.
pub fn apply(mut draft: DecisionDraft, features: &FeatureSnapshot, timeframe: Timeframe) -> DecisionDraft {
    if features.price.current_price.is_none() {
        return invalid_data(draft.key_metrics);
    }

    for window in &features.coverage.missing_windows {
        if let Some(tag) = gap_tag_for_window(*window, timeframe) {
            push_unique(&mut draft.reason_tags, tag);
        }
    }

    match timeframe {
        Timeframe::ShortTerm => {
            if !features.coverage.short_evaluable {
                draft.decision = Decision::NoTrade;
                draft.confidence = Confidence::Low;
                draft.execution_permission = ExecutionPermission::Deny;
                push_unique(&mut draft.reason_tags, ReasonTag::DataIncompleteLtf);
            }
        }
        Timeframe::MediumTerm => {
            if !features.coverage.medium_evaluable {
                draft.decision = Decision::NoTrade;
                draft.confidence = Confidence::Low;
                draft.execution_permission = ExecutionPermission::Deny;
                push_unique(&mut draft.reason_tags, ReasonTag::DataIncompleteMtf);
            } else if features.price.price_change_6h.is_none() {
                push_unique(&mut draft.reason_tags, ReasonTag::MtfDegradedTo1h);
                push_unique(&mut draft.reason_tags, ReasonTag::DataGap6h);
                if draft.confidence > Confidence::High {
                    draft.confidence = Confidence::High;
                }
                draft.execution_permission = draft.execution_permission.at_least_reduced();
            }
        }
    }

    draft
}

fn invalid_data(key_metrics: BTreeMap<String, f64>) -> DecisionDraft {
    DecisionDraft {
        decision: Decision::NoTrade,
        confidence: Confidence::Low,
        market_regime: lta_types::MarketRegime::Range,
        trade_quality: TradeQuality::Poor,
        execution_permission: ExecutionPermission::Deny,
        reason_tags: vec![ReasonTag::InvalidData],
        key_metrics,
    }
}

fn push_unique(tags: &mut Vec<ReasonTag>, tag: ReasonTag) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Which window a horizon cares about a cache gap in. Each horizon only
/// reports gaps in the windows it reads; a 6h gap is silent noise to the
/// short horizon and vice versa.
fn gap_tag_for_window(window: Window, timeframe: Timeframe) -> Option<ReasonTag> {
    match (timeframe, window) {
        (Timeframe::ShortTerm, Window::Min5) => Some(ReasonTag::DataGap5m),
        (Timeframe::ShortTerm, Window::Min15) => Some(ReasonTag::DataGap15m),
        (Timeframe::MediumTerm, Window::Hour1) => Some(ReasonTag::DataGap1h),
        (Timeframe::MediumTerm, Window::Hour6) => Some(ReasonTag::DataGap6h),
        _ => None,
    }
}
