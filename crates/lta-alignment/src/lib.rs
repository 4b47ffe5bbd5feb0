//! `AlignmentAnalyzer` — compares the short-term and medium-term
//! `DecisionFinal`s for one tick and produces a single cross-horizon
//! recommendation. Pure: it never touches the clock, the cache, or any
//! store, and never mutates either input.

use lta_types::{AlignmentAnalysis, AlignmentType, Confidence, ConflictResolution, Decision, DecisionFinal};

pub fn analyze(short: &DecisionFinal, medium: &DecisionFinal, conflict_resolution: ConflictResolution) -> AlignmentAnalysis {
    let alignment_type = classify(short.decision, medium.decision);
    let is_aligned = matches!(alignment_type, AlignmentType::BothLong | AlignmentType::BothShort | AlignmentType::BothNoTrade);
    let has_conflict = matches!(alignment_type, AlignmentType::ConflictLongShort | AlignmentType::ConflictShortLong);

    let (recommended_action, recommended_confidence, resolution, notes) = match alignment_type {
        AlignmentType::BothLong => {
            (Decision::Long, Some(short.confidence.max(medium.confidence)), None, "Both horizons agree: long.".to_string())
        }
        AlignmentType::BothShort => {
            (Decision::Short, Some(short.confidence.max(medium.confidence)), None, "Both horizons agree: short.".to_string())
        }
        AlignmentType::BothNoTrade => (Decision::NoTrade, None, None, "Neither horizon signals a trade.".to_string()),
        AlignmentType::PartialLong => partial(Decision::Long, short, medium),
        AlignmentType::PartialShort => partial(Decision::Short, short, medium),
        AlignmentType::ConflictLongShort | AlignmentType::ConflictShortLong => conflict(short, medium, conflict_resolution),
    };

    AlignmentAnalysis {
        alignment_type,
        is_aligned,
        has_conflict,
        conflict_resolution: resolution,
        recommended_action,
        recommended_confidence,
        recommendation_notes: notes,
    }
}

fn classify(short: Decision, medium: Decision) -> AlignmentType {
    match (short, medium) {
        (Decision::Long, Decision::Long) => AlignmentType::BothLong,
        (Decision::Short, Decision::Short) => AlignmentType::BothShort,
        (Decision::NoTrade, Decision::NoTrade) => AlignmentType::BothNoTrade,
        (Decision::Long, Decision::Short) => AlignmentType::ConflictLongShort,
        (Decision::Short, Decision::Long) => AlignmentType::ConflictShortLong,
        (Decision::Long, Decision::NoTrade) | (Decision::NoTrade, Decision::Long) => AlignmentType::PartialLong,
        (Decision::Short, Decision::NoTrade) | (Decision::NoTrade, Decision::Short) => AlignmentType::PartialShort,
    }
}

fn partial(side: Decision, short: &DecisionFinal, medium: &DecisionFinal) -> (Decision, Option<Confidence>, Option<ConflictResolution>, String) {
    let (signaling, horizon) = if short.decision == side { (short, "short-term") } else { (medium, "medium-term") };

    if !signaling.executable {
        return (Decision::NoTrade, None, None, format!("Only the {horizon} horizon signaled {}, but it is not currently executable.", side_name(side)));
    }

    (side, Some(signaling.confidence.step_down()), None, format!("Only the {horizon} horizon confirms {}; confidence reduced.", side_name(side)))
}

fn conflict(short: &DecisionFinal, medium: &DecisionFinal, resolution: ConflictResolution) -> (Decision, Option<Confidence>, Option<ConflictResolution>, String) {
    match resolution {
        ConflictResolution::NoTrade => {
            (Decision::NoTrade, None, Some(resolution), "Horizons disagree; configured policy is to stand down.".to_string())
        }
        ConflictResolution::FollowMediumTerm => resolved(medium, resolution, "medium-term"),
        ConflictResolution::FollowShortTerm => resolved(short, resolution, "short-term"),
        ConflictResolution::FollowHigherConfidence => {
            if short.confidence >= medium.confidence {
                resolved(short, resolution, "short-term")
            } else {
                resolved(medium, resolution, "medium-term")
            }
        }
    }
}

fn resolved(winner: &DecisionFinal, resolution: ConflictResolution, label: &str) -> (Decision, Option<Confidence>, Option<ConflictResolution>, String) {
    if !winner.executable {
        return (Decision::NoTrade, None, Some(resolution), format!("Horizons disagree; {label} would be followed but is not executable."));
    }
    (winner.decision, Some(winner.confidence.step_down()), Some(resolution), format!("Horizons disagree; following {label} per configured policy."))
}

fn side_name(decision: Decision) -> &'static str {
    match decision {
        Decision::Long => "long",
        Decision::Short => "short",
        Decision::NoTrade => "no_trade",
    }
}
