use std::sync::Arc;

use chrono::Duration;

use lta_state::InMemoryStateStore;
use lta_testkit::{core_tick, sample_thresholds, scenario_start, seed_lookback_history, short_term_long_tick};
use lta_types::{Decision, ReasonTag};

use super::*;

fn engine() -> Engine {
    Engine::new(sample_thresholds(), Arc::new(InMemoryStateStore::new()))
}

#[test]
fn a_tick_missing_a_required_core_field_yields_dual_no_trade_and_is_not_cached() {
    let engine = engine();
    let mut raw = core_tick("BTCUSDT", scenario_start());
    raw.price = None;

    let result = engine.on_new_tick_dual("BTCUSDT", raw);

    assert_eq!(result.short_term.decision, Decision::NoTrade);
    assert_eq!(result.medium_term.decision, Decision::NoTrade);
    assert!(result.short_term.reason_tags.contains(&ReasonTag::InvalidData));
    assert_eq!(engine.cache_metrics().no_historical_data(), 0);
}

#[test]
fn a_brand_new_symbol_with_no_warm_up_reports_missing_windows_rather_than_crashing() {
    let engine = engine();
    let now = scenario_start();
    let result = engine.on_new_tick_dual("ETHUSDT", core_tick("ETHUSDT", now));

    assert!(result.short_term.reason_tags.contains(&ReasonTag::DataGap5m));
    assert!(result.medium_term.reason_tags.contains(&ReasonTag::DataGap1h));
}

#[test]
fn warmed_up_symbol_with_a_qualifying_tick_produces_an_executable_long() {
    let engine = engine();
    let now = scenario_start();
    for seed in seed_lookback_history("BTCUSDT", now) {
        engine.on_new_tick_dual("BTCUSDT", seed);
    }

    let result = engine.on_new_tick_dual("BTCUSDT", short_term_long_tick("BTCUSDT", now));

    assert_eq!(result.short_term.decision, Decision::Long);
    assert!(result.short_term.executable);
}

#[test]
fn last_trace_is_absent_before_any_tick_and_present_after() {
    let engine = engine();
    assert!(engine.last_trace("BTCUSDT").is_none());

    engine.on_new_tick_dual("BTCUSDT", core_tick("BTCUSDT", scenario_start()));

    assert!(engine.last_trace("BTCUSDT").is_some());
}

#[test]
fn reload_with_a_malformed_document_keeps_the_previous_thresholds_in_effect() {
    let engine = engine();
    let before = engine.thresholds_version();

    let bad_path = std::path::Path::new("/nonexistent/does-not-exist.yaml");
    let err = engine.reload_thresholds_from_file(bad_path);

    assert!(err.is_err());
    assert_eq!(engine.thresholds_version(), before);
}

#[test]
fn global_risk_tags_are_empty_when_neither_horizon_raised_a_risk_exposure_tag() {
    let engine = engine();
    let now = scenario_start();
    for seed in seed_lookback_history("BTCUSDT", now) {
        engine.on_new_tick_dual("BTCUSDT", seed);
    }

    let result = engine.on_new_tick_dual("BTCUSDT", short_term_long_tick("BTCUSDT", now));

    assert!(result.global_risk_tags.is_empty());
    assert!(result.risk_exposure_allowed);
}

#[test]
fn repeated_ticks_advance_the_clock_using_the_ticks_own_timestamp() {
    let engine = engine();
    let now = scenario_start();
    let first = engine.on_new_tick_dual("BTCUSDT", core_tick("BTCUSDT", now));
    let second = engine.on_new_tick_dual("BTCUSDT", core_tick("BTCUSDT", now + Duration::seconds(5)));

    assert_eq!(first.timestamp, now);
    assert_eq!(second.timestamp, now + Duration::seconds(5));
}
