use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for conditions the cache would otherwise only surface through
/// logs. Cheap to clone — the inner counters are `Arc`-shared, so a
/// snapshot reflects live totals rather than a point-in-time copy.
#[derive(Debug, Default, Clone)]
pub struct TickCacheMetrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    stale_ticks: AtomicU64,
    gap_too_large: AtomicU64,
    no_historical_data: AtomicU64,
}

impl TickCacheMetrics {
    pub(crate) fn record_stale_tick(&self) {
        self.inner.stale_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_gap_too_large(&self) {
        self.inner.gap_too_large.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_no_historical_data(&self) {
        self.inner.no_historical_data.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stale_ticks(&self) -> u64 {
        self.inner.stale_ticks.load(Ordering::Relaxed)
    }

    pub fn gap_too_large(&self) -> u64 {
        self.inner.gap_too_large.load(Ordering::Relaxed)
    }

    pub fn no_historical_data(&self) -> u64 {
        self.inner.no_historical_data.load(Ordering::Relaxed)
    }
}
