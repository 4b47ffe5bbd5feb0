use chrono::{TimeZone, Utc};
use lta_types::{Decision, Timeframe};

use crate::{InMemoryStateStore, StateStore};

fn t(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[test]
fn save_then_read_round_trips() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    assert_eq!(store.get_last_time("BTCUSDT", Timeframe::ShortTerm), Some(t(0)));
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), Some(Decision::Long));
}

#[test]
fn save_overwrites_rather_than_accumulating() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    store.save("BTCUSDT", Timeframe::ShortTerm, t(100), Decision::Short);
    assert_eq!(store.get_last_time("BTCUSDT", Timeframe::ShortTerm), Some(t(100)));
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), Some(Decision::Short));
}

#[test]
fn timeframes_are_independent_for_the_same_symbol() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::MediumTerm), None);
}

#[test]
fn symbols_never_contaminate_each_other() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    assert_eq!(store.get_last_direction("ETHUSDT", Timeframe::ShortTerm), None);
}

#[test]
fn clear_scoped_to_symbol_leaves_others_untouched() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    store.save("ETHUSDT", Timeframe::ShortTerm, t(0), Decision::Short);

    store.clear(Some("BTCUSDT"));

    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), None);
    assert_eq!(store.get_last_direction("ETHUSDT", Timeframe::ShortTerm), Some(Decision::Short));
}

#[test]
fn clear_all_wipes_every_entry() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);
    store.save("ETHUSDT", Timeframe::MediumTerm, t(0), Decision::Short);

    store.clear(None);

    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), None);
    assert_eq!(store.get_last_direction("ETHUSDT", Timeframe::MediumTerm), None);
}

#[test]
fn apply_locked_sees_prior_entry_and_can_decline_to_write() {
    let store = InMemoryStateStore::new();
    store.save("BTCUSDT", Timeframe::ShortTerm, t(0), Decision::Long);

    let mut observed = None;
    store.apply_locked("BTCUSDT", Timeframe::ShortTerm, &mut |current| {
        observed = current;
        None
    });

    assert_eq!(observed.map(|e| e.last_signal_direction), Some(Decision::Long));
    // Declining to write must leave the prior entry intact.
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), Some(Decision::Long));
}

#[test]
fn apply_locked_on_an_empty_key_observes_none() {
    let store = InMemoryStateStore::new();
    let mut observed_none = false;
    store.apply_locked("BTCUSDT", Timeframe::ShortTerm, &mut |current| {
        observed_none = current.is_none();
        None
    });
    assert!(observed_none);
    assert_eq!(store.get_last_direction("BTCUSDT", Timeframe::ShortTerm), None);
}
