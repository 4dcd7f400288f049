//! Fixed-capacity metrics registry.
//!
//! One mutex guards the whole slot table, structure and contents alike.
//! The table is small and every operation is a bounded linear scan, so a
//! single coarse lock keeps the renderer's snapshot consistent without
//! per-slot bookkeeping. Slots are never destroyed: once the table is full,
//! capacity pressure is resolved by overwriting expired slots in place.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::metric::Metric;

/// One storage location in the table. Reusable across different metric
/// names once expired.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub metric: Metric,
    /// Monotonic deadline after which the entry is stale: not rendered,
    /// and its identity is up for grabs by any `put`.
    pub expires_at: Instant,
}

/// Latest-value-only metric store shared by producer tasks and the scrape
/// handler.
///
/// Constructed once at startup and injected by `Arc`; there is no global
/// instance. `put` never blocks beyond the lock and never returns an error
/// to the producer: a full table is reported through the log side-channel
/// and the update is dropped.
pub struct Registry {
    table: Mutex<Vec<Slot>>,
    capacity: usize,
}

impl Registry {
    /// Create a registry with a hard slot capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            table: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Hard upper bound on the number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots written at least once (expired slots included).
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Insert or refresh a metric with a time-to-live.
    pub fn put(&self, metric: Metric, ttl: Duration) {
        self.put_at(metric, ttl, Instant::now());
    }

    /// Clock-explicit variant of [`put`](Self::put).
    ///
    /// Scan order is insertion order, first match wins:
    /// 1. a slot with the same name is refreshed in place, even if it has
    ///    already expired — refresh-by-name takes priority over reuse;
    /// 2. otherwise the earliest-inserted expired slot is overwritten with
    ///    the new identity (count unchanged);
    /// 3. otherwise append while capacity remains;
    /// 4. otherwise warn and drop. Telemetry ingestion is best-effort: a
    ///    missed update is benign for periodic samplers, so the producer
    ///    never sees a failure.
    pub fn put_at(&self, metric: Metric, ttl: Duration, now: Instant) {
        let slot = Slot {
            metric,
            expires_at: now + ttl,
        };
        let mut table = self.lock();

        if let Some(existing) = table.iter_mut().find(|s| s.metric.name == metric.name) {
            *existing = slot;
            return;
        }

        if let Some(expired) = table.iter_mut().find(|s| now >= s.expires_at) {
            *expired = slot;
            return;
        }

        if table.len() < self.capacity {
            table.push(slot);
            return;
        }

        tracing::warn!(name = metric.name, capacity = self.capacity, "metric table full, update dropped");
    }

    /// Locked iteration over the table, used only by the renderer.
    ///
    /// The lock is held for the whole closure, so producers block until
    /// rendering completes and the renderer sees a single point-in-time
    /// view of every slot.
    pub(crate) fn with_slots<R>(&self, f: impl FnOnce(&[Slot]) -> R) -> R {
        let table = self.lock();
        f(&table)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Slot>> {
        // No operation can panic while holding the lock, so a poisoned
        // mutex still holds a consistent table.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
