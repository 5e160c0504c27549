//! Pool statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters, updated with relaxed atomics.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    grows: AtomicU64,
    returns: AtomicU64,
    foreign: AtomicU64,
    overflow: AtomicU64,
}

impl Counters {
    #[inline]
    pub(crate) fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn grew(&self) {
        self.grows.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn returned(&self) {
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn rejected(&self) {
        self.foreign.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn overflowed(&self) {
        self.overflow.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(
        &self,
        object_size: usize,
        total: usize,
        available: usize,
    ) -> PoolStats {
        PoolStats {
            object_size,
            total,
            available,
            outstanding: total.saturating_sub(available),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            grows: self.grows.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            foreign: self.foreign.load(Ordering::Relaxed),
            overflow: self.overflow.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time pool statistics for monitoring.
///
/// Counts (`total`, `available`, `outstanding`) are read together under the
/// pool's shared lock; the counters are independent relaxed loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Bytes per object.
    pub object_size: usize,
    /// Objects managed by the pool, available or outstanding.
    pub total: usize,
    /// Objects ready to be acquired.
    pub available: usize,
    /// Objects currently held by callers.
    pub outstanding: usize,
    /// Acquisitions that returned an object.
    pub hits: u64,
    /// Acquisitions that found the pool exhausted.
    pub misses: u64,
    /// Growth operations that added capacity.
    pub grows: u64,
    /// Objects accepted back into the pool.
    pub returns: u64,
    /// Objects rejected on return because another pool issued them.
    pub foreign: u64,
    /// Objects dropped on return because the queue was already full. Stays
    /// zero unless an object was duplicated outside the pool.
    pub overflow: u64,
}

impl PoolStats {
    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Bytes held by the pool across all objects.
    pub fn total_bytes(&self) -> usize {
        self.total.saturating_mul(self.object_size)
    }
}
