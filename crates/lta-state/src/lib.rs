//! Minimal per-`(symbol, timeframe)` store of `{last_decision_time,
//! last_signal_direction}`. No position, PnL, or order history is ever
//! retained — one entry per key, overwritten in place.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use lta_types::{Decision, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    pub last_decision_time: DateTime<Utc>,
    pub last_signal_direction: Decision,
}

/// Backend-agnostic interface: small enough to sit in front of an
/// in-memory map, Redis, or any other key-value store without the rest of
/// the engine noticing which one is in use.
pub trait StateStore: Send + Sync {
    fn save(&self, symbol: &str, timeframe: Timeframe, time: DateTime<Utc>, direction: Decision);
    fn get_last_time(&self, symbol: &str, timeframe: Timeframe) -> Option<DateTime<Utc>>;
    fn get_last_direction(&self, symbol: &str, timeframe: Timeframe) -> Option<Decision>;
    /// Scoped wipe: `Some(symbol)` clears only that symbol's entries across
    /// both timeframes; `None` clears everything.
    fn clear(&self, symbol: Option<&str>);

    /// Read the current entry for `(symbol, timeframe)`, hand it to
    /// `decide`, and write back whatever it returns — all while holding
    /// that key's lock, so a later tick can never race past an earlier one
    /// for the same key. `decide` returns `None` to leave the entry
    /// untouched.
    fn apply_locked(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        decide: &mut dyn FnMut(Option<StateEntry>) -> Option<StateEntry>,
    );
}

/// The authoritative in-memory implementation. Sharded by `(symbol,
/// timeframe)` via `DashMap`; each shard's internal lock is what backs
/// `apply_locked`'s atomicity.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: DashMap<(String, Timeframe), StateEntry>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn save(&self, symbol: &str, timeframe: Timeframe, time: DateTime<Utc>, direction: Decision) {
        self.entries.insert(
            (symbol.to_string(), timeframe),
            StateEntry { last_decision_time: time, last_signal_direction: direction },
        );
    }

    fn get_last_time(&self, symbol: &str, timeframe: Timeframe) -> Option<DateTime<Utc>> {
        self.entries.get(&(symbol.to_string(), timeframe)).map(|e| e.last_decision_time)
    }

    fn get_last_direction(&self, symbol: &str, timeframe: Timeframe) -> Option<Decision> {
        self.entries.get(&(symbol.to_string(), timeframe)).map(|e| e.last_signal_direction)
    }

    fn clear(&self, symbol: Option<&str>) {
        match symbol {
            Some(symbol) => self.entries.retain(|(s, _), _| s != symbol),
            None => self.entries.clear(),
        }
    }

    fn apply_locked(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        decide: &mut dyn FnMut(Option<StateEntry>) -> Option<StateEntry>,
    ) {
        use dashmap::mapref::entry::Entry;

        let key = (symbol.to_string(), timeframe);
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if let Some(new_entry) = decide(Some(*occupied.get())) {
                    occupied.insert(new_entry);
                }
            }
            Entry::Vacant(vacant) => {
                if let Some(new_entry) = decide(None) {
                    vacant.insert(new_entry);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
