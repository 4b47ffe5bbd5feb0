use std::sync::Arc;

use chrono::Duration;

use lta_engine::Engine;
use lta_state::InMemoryStateStore;
use lta_testkit::{
    sample_thresholds, scenario_start, seed_lookback_history, short_term_long_tick, short_term_short_tick,
};
use lta_types::{Decision, ReasonTag};

/// *S3 — cooldown block.* First qualifying tick signals LONG and is
/// executable; a repeat LONG 60s later (inside the short cooldown) keeps
/// the same decision but is blocked from execution.
#[test]
fn a_repeat_long_inside_the_cooldown_window_is_blocked_but_keeps_its_decision() {
    let engine = Engine::new(sample_thresholds(), Arc::new(InMemoryStateStore::new()));
    let t0 = scenario_start();
    for seed in seed_lookback_history("BTCUSDT", t0) {
        engine.on_new_tick_dual("BTCUSDT", seed);
    }

    let first = engine.on_new_tick_dual("BTCUSDT", short_term_long_tick("BTCUSDT", t0));
    assert_eq!(first.short_term.decision, Decision::Long);
    assert!(first.short_term.executable);

    let second = engine.on_new_tick_dual("BTCUSDT", short_term_long_tick("BTCUSDT", t0 + Duration::seconds(60)));
    assert_eq!(second.short_term.decision, Decision::Long);
    assert!(!second.short_term.executable);
    assert!(second.short_term.frequency_control.is_cooling);
    assert!(second.short_term.reason_tags.contains(&ReasonTag::FrequencyCooling));
}

/// *S4 — direction flip allowed.* Once the minimum interval (600s) has
/// elapsed, a flip to SHORT is accepted and becomes executable.
#[test]
fn a_direction_flip_after_the_minimum_interval_is_executable() {
    let engine = Engine::new(sample_thresholds(), Arc::new(InMemoryStateStore::new()));
    let t0 = scenario_start();
    for seed in seed_lookback_history("BTCUSDT", t0) {
        engine.on_new_tick_dual("BTCUSDT", seed);
    }

    engine.on_new_tick_dual("BTCUSDT", short_term_long_tick("BTCUSDT", t0));

    let flipped = engine.on_new_tick_dual("BTCUSDT", short_term_short_tick("BTCUSDT", t0 + Duration::seconds(700)));

    assert_eq!(flipped.short_term.decision, Decision::Short);
    assert!(flipped.short_term.executable);
    assert!(flipped.short_term.reason_tags.contains(&ReasonTag::DirectionFlip));
}
