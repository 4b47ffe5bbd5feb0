//! `DecisionGate` — turns a pure `DecisionDraft` into a `DecisionFinal` by
//! checking it against the previously stored signal for the same
//! `(symbol, timeframe)`. Never rewrites the draft's own verdict fields;
//! only adds timing tags and computes `executable`.

use chrono::{DateTime, Utc};

use lta_config::FrequencyControlThresholds;
use lta_state::{StateEntry, StateStore};
use lta_types::{Decision, DecisionDraft, DecisionFinal, FrequencyControl, ReasonTag, Timeframe};

/// `NO_TRADE` always passes through untouched — there is nothing to
/// cool down or flip, but its own permission still gates `executable`: a
/// denied `NO_TRADE` (data gap, Stage-B veto) stays `executable=false`,
/// while a genuine no-signal `NO_TRADE` (permission `Allow`) is
/// `executable=true`. For `Long`/`Short`, the prior entry for this key is
/// read, checked, and (if not blocked) overwritten in one locked
/// read-decide-write pass.
pub fn apply(
    draft: &DecisionDraft,
    symbol: &str,
    timeframe: Timeframe,
    now: DateTime<Utc>,
    thresholds: &FrequencyControlThresholds,
    store: &dyn StateStore,
) -> DecisionFinal {
    if draft.decision == Decision::NoTrade {
        let executable = DecisionFinal::compute_executable(draft.decision, draft.execution_permission, false, false);
        return finalize(draft, timeframe, executable, FrequencyControl::default());
    }

    let (cooldown_secs, min_interval_secs) = match timeframe {
        Timeframe::ShortTerm => (thresholds.cooldown_short_secs, thresholds.min_interval_short_secs),
        Timeframe::MediumTerm => (thresholds.cooldown_medium_secs, thresholds.min_interval_medium_secs),
    };

    let decision = draft.decision;
    let mut control = FrequencyControl::default();

    store.apply_locked(symbol, timeframe, &mut |prior: Option<StateEntry>| match prior {
        None => Some(StateEntry { last_decision_time: now, last_signal_direction: decision }),
        Some(entry) => {
            let elapsed = (now - entry.last_decision_time).num_seconds();
            if entry.last_signal_direction == decision {
                if elapsed < cooldown_secs {
                    control.is_cooling = true;
                    control.block_reason =
                        Some(format!("{} signaled {elapsed}s ago; cooldown is {cooldown_secs}s", decision_name(decision)));
                    control.added_tags.push(ReasonTag::FrequencyCooling);
                    return None;
                }
                Some(StateEntry { last_decision_time: now, last_signal_direction: decision })
            } else if elapsed < min_interval_secs {
                control.min_interval_violated = true;
                control.block_reason =
                    Some(format!("direction changed after {elapsed}s; minimum interval is {min_interval_secs}s"));
                control.added_tags.push(ReasonTag::MinIntervalViolated);
                control.added_tags.push(ReasonTag::DirectionFlip);
                None
            } else {
                control.added_tags.push(ReasonTag::DirectionFlip);
                Some(StateEntry { last_decision_time: now, last_signal_direction: decision })
            }
        }
    });

    control.is_blocked = control.is_cooling || control.min_interval_violated;
    let executable =
        DecisionFinal::compute_executable(draft.decision, draft.execution_permission, control.is_cooling, control.min_interval_violated);

    finalize(draft, timeframe, executable, control)
}

fn decision_name(decision: Decision) -> &'static str {
    match decision {
        Decision::Long => "long",
        Decision::Short => "short",
        Decision::NoTrade => "no_trade",
    }
}

fn finalize(draft: &DecisionDraft, timeframe: Timeframe, executable: bool, frequency_control: FrequencyControl) -> DecisionFinal {
    let mut reason_tags = draft.reason_tags.clone();
    for tag in &frequency_control.added_tags {
        if !reason_tags.contains(tag) {
            reason_tags.push(*tag);
        }
    }

    DecisionFinal {
        timeframe,
        decision: draft.decision,
        confidence: draft.confidence,
        market_regime: draft.market_regime,
        trade_quality: draft.trade_quality,
        execution_permission: draft.execution_permission,
        reason_tags,
        key_metrics: draft.key_metrics.clone(),
        executable,
        frequency_control,
    }
}
