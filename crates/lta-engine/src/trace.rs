use std::collections::VecDeque;
use std::sync::Mutex;

use dashmap::DashMap;
use lta_normalizer::NormalizationTrace;
use lta_types::Coverage;

/// The last normalization trace and lookback-coverage map retained for one
/// symbol — a diagnostic snapshot, not a history (§6 "Pipeline trace").
#[derive(Debug, Clone)]
pub struct TraceSnapshot {
    pub normalization: NormalizationTrace,
    pub coverage: Coverage,
}

/// Bounded per-symbol trace storage: one entry per symbol, capped at
/// `capacity` symbols tracked at once. Mirrors the sticky, explicitly
/// bounded state fields of the reference engine's risk state rather than
/// an unbounded append log.
pub struct TraceStore {
    capacity: usize,
    entries: DashMap<String, TraceSnapshot>,
    order: Mutex<VecDeque<String>>,
}

impl TraceStore {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: DashMap::new(), order: Mutex::new(VecDeque::new()) }
    }

    pub fn record(&self, symbol: &str, normalization: NormalizationTrace, coverage: Coverage) {
        let is_new = !self.entries.contains_key(symbol);
        self.entries.insert(symbol.to_string(), TraceSnapshot { normalization, coverage });

        if is_new {
            let mut order = self.order.lock().expect("trace store order lock poisoned");
            order.push_back(symbol.to_string());
            if order.len() > self.capacity {
                if let Some(evicted) = order.pop_front() {
                    self.entries.remove(&evicted);
                }
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<TraceSnapshot> {
        self.entries.get(symbol).map(|e| e.clone())
    }
}
