use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use chrono::{Duration, TimeZone, Utc};
use lta_config::FrequencyControlThresholds;
use lta_gate::apply;
use lta_state::InMemoryStateStore;
use lta_types::{Confidence, Decision, DecisionDraft, ExecutionPermission, MarketRegime, Timeframe, TradeQuality};

fn t(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(seconds)
}

fn draft() -> DecisionDraft {
    DecisionDraft {
        decision: Decision::Long,
        confidence: Confidence::High,
        market_regime: MarketRegime::Trend,
        trade_quality: TradeQuality::Good,
        execution_permission: ExecutionPermission::Allow,
        reason_tags: Vec::new(),
        key_metrics: BTreeMap::new(),
    }
}

/// Concurrent calls for the same `(symbol, timeframe)` must never corrupt
/// the store or panic — the per-key lock inside `apply_locked` serializes
/// every read-decide-write pass into a total order.
#[test]
fn concurrent_applies_for_the_same_key_never_corrupt_the_store() {
    let store = Arc::new(InMemoryStateStore::new());
    let thresholds = Arc::new(FrequencyControlThresholds {
        cooldown_short_secs: 0,
        cooldown_medium_secs: 0,
        min_interval_short_secs: 0,
        min_interval_medium_secs: 0,
    });

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let store = Arc::clone(&store);
            let thresholds = Arc::clone(&thresholds);
            thread::spawn(move || {
                apply(&draft(), "BTCUSDT", Timeframe::ShortTerm, t(i), &thresholds, store.as_ref());
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let stored_time = store.get_last_time("BTCUSDT", Timeframe::ShortTerm);
    assert!(stored_time.is_some());
    let valid_times: Vec<_> = (0..16).map(t).collect();
    assert!(valid_times.contains(&stored_time.unwrap()));
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), Some(Decision::Long));
}
