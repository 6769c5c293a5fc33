//! Worker loop — drives one sensor through the sampling lockstep.
//!
//! Every tick each worker samples, publishes into its own slice of the
//! epoch buffer, and arrives at the tick barrier. On the final tick of an
//! epoch the designated worker compiles and emits the report, and then all
//! workers pass a second barrier round (the epoch fence) before anyone
//! starts the next epoch. The fence is what keeps the buffer reuse safe:
//! epoch e+1's writes land in the same slots the aggregator just read, so
//! nobody may publish for e+1 until the report for e is done.

use crate::aggregate::Aggregator;
use crate::barrier::TickBarrier;
use crate::buffer::EpochBuffer;
use crate::config::EngineConfig;
use crate::sampler::SampleSource;
use crate::sink::ReportSink;
use std::sync::Arc;

/// What a worker does at epoch boundaries
pub enum WorkerRole {
    /// Samples only; waits out the epoch fence while the report compiles
    Sampler,
    /// Additionally compiles and emits the per-epoch report
    Designated {
        aggregator: Aggregator,
        sink: Box<dyn ReportSink>,
    },
}

/// One sampling worker, bound to its slice of the shared epoch buffer
pub struct SensorWorker {
    worker_id: usize,
    ticks_per_epoch: usize,
    epoch_count: usize,
    sampler: Box<dyn SampleSource>,
    buffer: Arc<EpochBuffer>,
    barrier: Arc<TickBarrier>,
    role: WorkerRole,
}

impl SensorWorker {
    /// Create a worker for `worker_id`
    pub fn new(
        worker_id: usize,
        config: &EngineConfig,
        sampler: Box<dyn SampleSource>,
        buffer: Arc<EpochBuffer>,
        barrier: Arc<TickBarrier>,
        role: WorkerRole,
    ) -> Self {
        Self {
            worker_id,
            ticks_per_epoch: config.ticks_per_epoch,
            epoch_count: config.epoch_count,
            sampler,
            buffer,
            barrier,
            role,
        }
    }

    /// Run the worker to completion: `epoch_count * ticks_per_epoch` ticks.
    ///
    /// Termination is fixed in advance; there is no dynamic stop condition.
    pub fn run(mut self) {
        tracing::debug!(worker = self.worker_id, "sensor worker started");

        let total_ticks = self.epoch_count * self.ticks_per_epoch;
        for tick in 0..total_ticks {
            let epoch = (tick / self.ticks_per_epoch) as u64;
            let local_tick = tick % self.ticks_per_epoch;

            let reading = self.sampler.next_reading();
            self.buffer.publish(self.worker_id, local_tick, reading);
            self.barrier.arrive(self.worker_id);

            // Past this point every worker's reading for this tick is
            // published and visible.

            if local_tick == self.ticks_per_epoch - 1 {
                if let WorkerRole::Designated { aggregator, sink } = &mut self.role {
                    let snapshot = self.buffer.snapshot();
                    if let Some(report) = aggregator.compile(epoch, &snapshot) {
                        tracing::info!(epoch, worker = self.worker_id, "epoch report compiled");
                        sink.emit(&report);
                    }
                }
                // Epoch fence: hold everyone until the report for this
                // epoch is emitted, so no next-epoch publish overwrites a
                // slot the aggregator is still reading.
                self.barrier.arrive(self.worker_id);
            }
        }

        tracing::debug!(worker = self.worker_id, "sensor worker finished");
    }
}
