//! Shared epoch buffer for the sampling hot path.
//!
//! `EpochBuffer` is a fixed-size table of readings indexed by
//! `worker_id * ticks_per_epoch + tick`. It is allocated once at startup and
//! overwritten in place every epoch — no heap allocation occurs while the
//! workers are running.
//!
//! # Synchronization contract
//!
//! Each worker owns the writes to its own index range, so publishes never
//! contend. Slots are atomics with relaxed ordering; the tick barrier's
//! internal lock is the memory-visibility boundary. A published value is
//! guaranteed visible to other workers (and to the aggregator) only after
//! the barrier release for that tick, and [`EpochBuffer::snapshot`] is only
//! valid to call after the release for the epoch's final tick.

use crate::types::Reading;
use std::sync::atomic::{AtomicI64, Ordering};

/// Fixed-capacity table of the current epoch's readings
pub struct EpochBuffer {
    slots: Vec<AtomicI64>,
    worker_count: usize,
    ticks_per_epoch: usize,
}

impl EpochBuffer {
    /// Allocate a zeroed buffer for `worker_count * ticks_per_epoch` readings
    pub fn new(worker_count: usize, ticks_per_epoch: usize) -> Self {
        assert!(worker_count > 0 && ticks_per_epoch > 0);
        let slots = (0..worker_count * ticks_per_epoch)
            .map(|_| AtomicI64::new(0))
            .collect();
        Self {
            slots,
            worker_count,
            ticks_per_epoch,
        }
    }

    /// Number of readings the buffer holds
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the buffer has zero capacity (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Flattened index of `(worker_id, tick)`.
    ///
    /// Panics on out-of-range arguments: that is a misconfigured caller, not
    /// a recoverable condition.
    #[inline]
    fn index(&self, worker_id: usize, tick: usize) -> usize {
        assert!(
            worker_id < self.worker_count,
            "worker id {} out of range ({} workers)",
            worker_id,
            self.worker_count
        );
        assert!(
            tick < self.ticks_per_epoch,
            "tick {} out of range ({} ticks per epoch)",
            tick,
            self.ticks_per_epoch
        );
        worker_id * self.ticks_per_epoch + tick
    }

    /// Publish `value` as worker `worker_id`'s reading for `tick`.
    ///
    /// The caller must be the unique owner of `worker_id` for this tick.
    #[inline]
    pub fn publish(&self, worker_id: usize, tick: usize, value: Reading) {
        self.slots[self.index(worker_id, tick)].store(value, Ordering::Relaxed);
    }

    /// Read one slot. Only meaningful after the barrier release for `tick`.
    #[inline]
    pub fn get(&self, worker_id: usize, tick: usize) -> Reading {
        self.slots[self.index(worker_id, tick)].load(Ordering::Relaxed)
    }

    /// Copy the whole buffer out in worker-major order.
    ///
    /// Only valid after the barrier release for the epoch's final tick, when
    /// every slot of the epoch has been published.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect()
    }
}

impl std::fmt::Debug for EpochBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpochBuffer")
            .field("worker_count", &self.worker_count)
            .field("ticks_per_epoch", &self.ticks_per_epoch)
            .finish()
    }
}
