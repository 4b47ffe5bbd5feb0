use chrono::{Duration, TimeZone, Utc};

use crate::{GapReason, TickCache, WindowSpec};

fn t(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[test]
fn insert_then_lookup_returns_exact_match() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 100.0);
    let result = cache.floor_lookup("BTCUSDT", t(0), 10);
    assert!(result.valid);
    assert_eq!(result.entry, Some(100.0));
    assert_eq!(result.gap_seconds, Some(0));
}

#[test]
fn stale_or_equal_timestamp_is_rejected() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(100), 1.0);
    cache.insert("BTCUSDT", t(100), 2.0);
    cache.insert("BTCUSDT", t(50), 3.0);
    assert_eq!(cache.metrics().stale_ticks(), 2);

    let result = cache.floor_lookup("BTCUSDT", t(100), 0);
    assert_eq!(result.entry, Some(1.0));
}

#[test]
fn floor_lookup_never_returns_a_future_entry() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 1.0);
    cache.insert("BTCUSDT", t(100), 2.0);
    cache.insert("BTCUSDT", t(200), 3.0);

    let result = cache.floor_lookup("BTCUSDT", t(150), 1000);
    assert!(result.valid);
    assert_eq!(result.entry, Some(2.0));
}

#[test]
fn gap_beyond_tolerance_is_invalid() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 1.0);

    let result = cache.floor_lookup("BTCUSDT", t(1000), 90);
    assert!(!result.valid);
    assert_eq!(result.reason, Some(GapReason::GapTooLarge));
    assert_eq!(cache.metrics().gap_too_large(), 1);
}

#[test]
fn missing_symbol_is_no_historical_data() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    let result = cache.floor_lookup("ETHUSDT", t(0), 90);
    assert!(!result.valid);
    assert_eq!(result.reason, Some(GapReason::NoHistoricalData));
    assert_eq!(cache.metrics().no_historical_data(), 1);
}

#[test]
fn target_before_earliest_entry_is_no_historical_data() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(1000), 1.0);
    let result = cache.floor_lookup("BTCUSDT", t(0), 90);
    assert!(!result.valid);
    assert_eq!(result.reason, Some(GapReason::NoHistoricalData));
}

#[test]
fn retention_evicts_entries_older_than_bound() {
    let cache: TickCache<f64> = TickCache::new(Duration::seconds(100));
    cache.insert("BTCUSDT", t(0), 1.0);
    cache.insert("BTCUSDT", t(50), 2.0);
    cache.insert("BTCUSDT", t(500), 3.0);

    // t(0) and t(50) are both more than 100s behind t(500) and should be gone.
    let result = cache.floor_lookup("BTCUSDT", t(60), 10_000);
    assert!(!result.valid);
    assert_eq!(result.reason, Some(GapReason::NoHistoricalData));
}

#[test]
fn coverage_resolves_every_declared_window() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 1.0);
    cache.insert("BTCUSDT", t(300), 2.0);
    cache.insert("BTCUSDT", t(3600), 3.0);

    let windows = [
        WindowSpec { name: "5m", lookback_seconds: 300, tolerance_seconds: 90 },
        WindowSpec { name: "1h", lookback_seconds: 3600, tolerance_seconds: 600 },
    ];
    let result = cache.coverage("BTCUSDT", t(3600), &windows);
    assert_eq!(result.len(), 2);
    assert!(result["5m"].valid);
    assert!(result["1h"].valid);
}

#[test]
fn symbols_never_contaminate_each_other() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 1.0);
    let result = cache.floor_lookup("ETHUSDT", t(0), 90);
    assert!(!result.valid);
}
