//! Tick barrier — lockstep synchronization for the sampling workers.
//!
//! All readiness state lives inside [`TickBarrier`]; workers interact with
//! it only through [`TickBarrier::arrive`]. The barrier is OPEN while it is
//! accepting arrivals for the current tick; the last arrival transitions it
//! to CLOSED, releases every waiter, and reopens it for the next tick in the
//! same critical section.
//!
//! # Reset ordering
//!
//! Resetting readiness flags is the classic hazard in this design: reset a
//! flag too early and the barrier stalls waiting for a worker that already
//! arrived; reset it too late and a stale flag lets the next tick release
//! without synchronizing at all. Here the last arriver clears the whole
//! readiness vector and bumps a generation counter in one step under the
//! lock. Waiters block on the generation changing, never on the flags, so a
//! cleared flag can neither stall nor falsely release a tick.
//!
//! The barrier's mutex doubles as the memory-visibility boundary for the
//! epoch buffer: a reading published before `arrive` is visible to every
//! worker released by the same tick.
//!
//! # Liveness
//!
//! There is no timeout. If a worker never arrives, every other worker
//! blocks in `arrive` forever; detecting that is explicitly left to
//! external monitoring.

use std::sync::{Condvar, Mutex};

struct BarrierState {
    /// One flag per worker: true = published this tick's reading
    ready: Vec<bool>,
    /// How many workers have arrived this tick
    arrived: usize,
    /// Incremented once per completed tick, atomically with the release
    generation: u64,
}

/// Reusable all-arrive barrier for a fixed set of workers
pub struct TickBarrier {
    state: Mutex<BarrierState>,
    release: Condvar,
    parties: usize,
}

impl TickBarrier {
    /// Create a barrier for `parties` workers
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "barrier needs at least one party");
        Self {
            state: Mutex::new(BarrierState {
                ready: vec![false; parties],
                arrived: 0,
                generation: 0,
            }),
            release: Condvar::new(),
            parties,
        }
    }

    /// Number of workers the barrier synchronizes
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Completed tick count; useful for instrumentation and tests
    pub fn generation(&self) -> u64 {
        self.state.lock().expect("barrier mutex poisoned").generation
    }

    /// Mark `worker_id` ready for this tick and block until all workers are.
    ///
    /// The last arriver resets the readiness vector, advances the
    /// generation, and wakes everyone; its own call returns immediately.
    /// Arriving twice in the same tick panics: it means a worker looped
    /// without being released, which is a bug, not a recoverable state.
    pub fn arrive(&self, worker_id: usize) {
        let mut state = self.state.lock().expect("barrier mutex poisoned");
        assert!(
            worker_id < self.parties,
            "worker id {} out of range ({} parties)",
            worker_id,
            self.parties
        );
        assert!(
            !state.ready[worker_id],
            "worker {} arrived twice in one tick",
            worker_id
        );

        state.ready[worker_id] = true;
        state.arrived += 1;

        if state.arrived == self.parties {
            // CLOSED: release everyone and reopen for the next tick. Flag
            // reset and generation bump happen under the same lock, so no
            // waiter can observe a half-reset barrier.
            for flag in state.ready.iter_mut() {
                *flag = false;
            }
            state.arrived = 0;
            state.generation += 1;
            self.release.notify_all();
            return;
        }

        let my_generation = state.generation;
        while state.generation == my_generation {
            state = self
                .release
                .wait(state)
                .expect("barrier mutex poisoned");
        }
    }
}

impl std::fmt::Debug for TickBarrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickBarrier")
            .field("parties", &self.parties)
            .field("generation", &self.generation())
            .finish()
    }
}
