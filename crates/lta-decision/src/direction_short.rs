use lta_config::ShortTermOpportunityThresholds;
use lta_types::{FeatureSnapshot, ReasonTag};

use crate::direction::Candidates;

/// Short-horizon direction: a K-of-N vote over four fixed axes — 15m price
/// change, 15m imbalance, 15m volume ratio (direction-confirming), and 5m
/// imbalance as confirmation. An axis with a missing input simply does not
/// vote; it never counts against either side.
///
/// The 15m-imbalance axis reuses the configured `imbalance_5m` magnitude as
/// its threshold — the short-horizon config carries one imbalance
/// magnitude, applied at both granularities it covers.
pub fn evaluate(
    features: &FeatureSnapshot,
    thresholds: &ShortTermOpportunityThresholds,
    required_signals: u8,
) -> (Candidates, Vec<ReasonTag>) {
    let mut votes_long = 0u8;
    let mut votes_short = 0u8;

    if let Some(pc_15m) = features.price.price_change_15m {
        if pc_15m > thresholds.price_change_15m {
            votes_long += 1;
        } else if pc_15m < -thresholds.price_change_15m {
            votes_short += 1;
        }
    }

    if let Some(imbalance_15m) = features.taker_imbalance.taker_imbalance_15m {
        if imbalance_15m > thresholds.imbalance_5m {
            votes_long += 1;
        } else if imbalance_15m < -thresholds.imbalance_5m {
            votes_short += 1;
        }
    }

    if let (Some(ratio), Some(pc_15m)) = (features.volume.volume_ratio_15m, features.price.price_change_15m) {
        if ratio > thresholds.volume_ratio_15m {
            if pc_15m > 0.0 {
                votes_long += 1;
            } else if pc_15m < 0.0 {
                votes_short += 1;
            }
        }
    }

    if let Some(imbalance_5m) = features.taker_imbalance.taker_imbalance_5m {
        if imbalance_5m > thresholds.imbalance_5m {
            votes_long += 1;
        } else if imbalance_5m < -thresholds.imbalance_5m {
            votes_short += 1;
        }
    }

    let long = votes_long >= required_signals && votes_long > votes_short;
    let short = votes_short >= required_signals && votes_short > votes_long;

    let mut tags = Vec::new();
    if long {
        tags.push(ReasonTag::StrongBuyPressure);
    }
    if short {
        tags.push(ReasonTag::StrongSellPressure);
    }

    (Candidates { long, short }, tags)
}
