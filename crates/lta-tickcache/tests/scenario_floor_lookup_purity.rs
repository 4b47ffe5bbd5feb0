use chrono::{Duration, TimeZone, Utc};
use lta_tickcache::TickCache;

fn t(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

/// A later insertion must never change the outcome of a floor lookup for an
/// earlier target time — otherwise a replay (backtest) and a live run could
/// diverge depending on how far ahead of `target_time` the cache had
/// already been fed.
#[test]
fn later_inserts_do_not_change_earlier_floor_lookups() {
    let cache: TickCache<f64> = TickCache::new(Duration::hours(24));
    cache.insert("BTCUSDT", t(0), 100.0);
    cache.insert("BTCUSDT", t(60), 101.0);

    let before = cache.floor_lookup("BTCUSDT", t(90), 1000);
    assert_eq!(before.entry, Some(101.0));

    // A tick that lands after the target time must not retroactively
    // become the answer for a lookback into the past.
    cache.insert("BTCUSDT", t(120), 102.0);
    let after = cache.floor_lookup("BTCUSDT", t(90), 1000);
    assert_eq!(after, before);
}

#[test]
fn replaying_ticks_in_order_matches_a_single_batch_insert() {
    let live: TickCache<f64> = TickCache::new(Duration::hours(24));
    let replay: TickCache<f64> = TickCache::new(Duration::hours(24));

    let ticks = [(t(0), 1.0), (t(30), 2.0), (t(90), 3.0), (t(200), 4.0)];

    for (ts, price) in ticks {
        live.insert("BTCUSDT", ts, price);
    }
    for (ts, price) in ticks {
        replay.insert("BTCUSDT", ts, price);
    }

    for target in [t(10), t(50), t(100), t(250)] {
        assert_eq!(
            live.floor_lookup("BTCUSDT", target, 10_000),
            replay.floor_lookup("BTCUSDT", target, 10_000)
        );
    }
}
