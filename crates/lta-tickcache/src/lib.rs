//! Ordered per-symbol buffer of raw snapshots supporting floor-lookup with
//! gap tolerance.
//!
//! `TickCache` never looks into the future: `floor_lookup` returns the
//! latest entry at or before the target time, never a later one. This is
//! what keeps backtest and live evaluation numerically identical — a
//! nearest-sample cache would let a later tick leak into a past lookback
//! window.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod metrics;

pub use metrics::TickCacheMetrics;

/// Why a `floor_lookup` failed to produce a usable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    GapTooLarge,
    NoHistoricalData,
}

/// Outcome of a single floor lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookbackResult<S> {
    pub valid: bool,
    pub reason: Option<GapReason>,
    pub entry: Option<S>,
    pub gap_seconds: Option<i64>,
}

impl<S> LookbackResult<S> {
    fn invalid(reason: GapReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            entry: None,
            gap_seconds: None,
        }
    }

    fn valid(entry: S, gap_seconds: i64) -> Self {
        Self {
            valid: true,
            reason: None,
            entry: Some(entry),
            gap_seconds: Some(gap_seconds),
        }
    }
}

/// A window to resolve through `coverage`: a human name, how far back to
/// look, and the tolerance within which a floor entry is still considered
/// fresh enough to use. The table itself (5m→90s, 15m→300s, 1h→600s,
/// 6h→1800s) is configuration, not a cache concern — callers supply it.
#[derive(Debug, Clone, Copy)]
pub struct WindowSpec<'a> {
    pub name: &'a str,
    pub lookback_seconds: i64,
    pub tolerance_seconds: i64,
}

struct Shard<S> {
    entries: Vec<(DateTime<Utc>, S)>,
}

impl<S> Shard<S> {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entries.last().map(|(ts, _)| *ts)
    }

    /// Largest index `i` such that `entries[i].0 <= target`, or `None`.
    fn floor_index(&self, target: DateTime<Utc>) -> Option<usize> {
        match self.entries.binary_search_by(|(ts, _)| ts.cmp(&target)) {
            Ok(i) => Some(i),
            Err(0) => None,
            Err(i) => Some(i - 1),
        }
    }
}

/// Per-symbol sorted buffer of snapshots with floor-lookup and bounded
/// retention. `S` is the snapshot payload type — the cache imposes no
/// shape on it beyond "cloneable and timestamped on insert".
///
/// Sharded by symbol: each symbol's buffer is an independent lock, so
/// inserts and lookups for different symbols never contend. Lock hold
/// time for a lookup is the binary search itself, `O(log n)` in shard size.
pub struct TickCache<S> {
    shards: RwLock<BTreeMap<String, RwLock<Shard<S>>>>,
    retention: chrono::Duration,
    metrics: TickCacheMetrics,
}

impl<S: Clone> TickCache<S> {
    /// `retention` bounds how long an entry survives past the newest tick
    /// for its symbol; the caller is responsible for setting it to at
    /// least `max(lookback_windows) + safety_margin` so that every window
    /// the configuration declares evaluable always has an eligible floor
    /// entry.
    pub fn new(retention: chrono::Duration) -> Self {
        Self {
            shards: RwLock::new(BTreeMap::new()),
            retention,
            metrics: TickCacheMetrics::default(),
        }
    }

    pub fn metrics(&self) -> TickCacheMetrics {
        self.metrics.clone()
    }

    /// Append `snapshot` for `symbol` at `timestamp` if it is strictly
    /// newer than the latest stored entry; otherwise discard and count it
    /// as a stale tick. Evicts entries older than `retention` relative to
    /// the newly accepted timestamp.
    pub fn insert(&self, symbol: &str, timestamp: DateTime<Utc>, snapshot: S) {
        let shards = self.shards.read().expect("tick cache shard map poisoned");
        if let Some(shard_lock) = shards.get(symbol) {
            let mut shard = shard_lock.write().expect("tick cache shard poisoned");
            self.insert_into(&mut shard, symbol, timestamp, snapshot);
            return;
        }
        drop(shards);

        let mut shards = self.shards.write().expect("tick cache shard map poisoned");
        let shard_lock = shards.entry(symbol.to_string()).or_insert_with(|| RwLock::new(Shard::new()));
        let mut shard = shard_lock.write().expect("tick cache shard poisoned");
        self.insert_into(&mut shard, symbol, timestamp, snapshot);
    }

    fn insert_into(&self, shard: &mut Shard<S>, symbol: &str, timestamp: DateTime<Utc>, snapshot: S) {
        if let Some(last) = shard.last_timestamp() {
            if timestamp <= last {
                self.metrics.record_stale_tick();
                tracing::debug!(
                    symbol,
                    %timestamp,
                    last_timestamp = %last,
                    "discarding out-of-order or duplicate tick"
                );
                return;
            }
        }
        shard.entries.push((timestamp, snapshot));

        let cutoff = timestamp - self.retention;
        let evict_to = shard.entries.partition_point(|(ts, _)| *ts < cutoff);
        if evict_to > 0 {
            shard.entries.drain(0..evict_to);
        }
    }

    /// Return the entry with the largest timestamp `<= target_time`. If
    /// the gap between `target_time` and that entry exceeds
    /// `tolerance_seconds`, the result is invalid with `GapTooLarge`; if no
    /// such entry exists at all, it is invalid with `NoHistoricalData`.
    pub fn floor_lookup(
        &self,
        symbol: &str,
        target_time: DateTime<Utc>,
        tolerance_seconds: i64,
    ) -> LookbackResult<S> {
        let shards = self.shards.read().expect("tick cache shard map poisoned");
        let Some(shard_lock) = shards.get(symbol) else {
            self.metrics.record_no_historical_data();
            return LookbackResult::invalid(GapReason::NoHistoricalData);
        };
        let shard = shard_lock.read().expect("tick cache shard poisoned");

        let Some(idx) = shard.floor_index(target_time) else {
            self.metrics.record_no_historical_data();
            return LookbackResult::invalid(GapReason::NoHistoricalData);
        };
        let (ts, entry) = &shard.entries[idx];
        let gap = (target_time - *ts).num_seconds();
        if gap > tolerance_seconds {
            self.metrics.record_gap_too_large();
            return LookbackResult::invalid(GapReason::GapTooLarge);
        }
        LookbackResult::valid(entry.clone(), gap)
    }

    /// Resolve a floor lookup for every entry in `windows`, keyed by
    /// `WindowSpec::name`.
    pub fn coverage(
        &self,
        symbol: &str,
        now: DateTime<Utc>,
        windows: &[WindowSpec<'_>],
    ) -> BTreeMap<String, LookbackResult<S>> {
        windows
            .iter()
            .map(|w| {
                let target = now - chrono::Duration::seconds(w.lookback_seconds);
                (w.name.to_string(), self.floor_lookup(symbol, target, w.tolerance_seconds))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
