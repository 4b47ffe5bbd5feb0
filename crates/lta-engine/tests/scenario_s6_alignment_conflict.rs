use std::sync::Arc;

use lta_engine::Engine;
use lta_state::InMemoryStateStore;
use lta_testkit::{sample_thresholds, scenario_start, seed_lookback_history, short_term_long_tick};
use lta_types::{AlignmentType, ConflictResolution, Decision};

/// *S6 — alignment conflict.* One tick whose short-horizon fields (5m/15m)
/// favor LONG and whose 1h fields favor SHORT strongly enough to set the
/// medium horizon's regime to `Trend` and its direction to SHORT. Each
/// horizon keeps its own independent decision; the shared policy is
/// `no_trade` on conflict.
#[test]
fn opposing_horizons_recommend_no_trade_under_the_configured_conflict_policy() {
    let engine = Engine::new(sample_thresholds(), Arc::new(InMemoryStateStore::new()));
    let now = scenario_start();
    for seed in seed_lookback_history("BTCUSDT", now) {
        engine.on_new_tick_dual("BTCUSDT", seed);
    }

    let mut tick = short_term_long_tick("BTCUSDT", now);
    tick.price_change_1h = Some(-0.025);
    tick.oi_change_1h = Some(-0.06);
    tick.taker_imbalance_1h = Some(-0.75);

    let result = engine.on_new_tick_dual("BTCUSDT", tick);

    assert_eq!(result.short_term.decision, Decision::Long);
    assert_eq!(result.medium_term.decision, Decision::Short);
    assert!(result.short_term.executable);
    assert!(result.medium_term.executable);

    assert_eq!(result.alignment.alignment_type, AlignmentType::ConflictLongShort);
    assert!(result.alignment.has_conflict);
    assert_eq!(result.alignment.recommended_action, Decision::NoTrade);
    assert_eq!(result.alignment.conflict_resolution, Some(ConflictResolution::NoTrade));
}
