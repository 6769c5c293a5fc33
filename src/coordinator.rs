//! Coordinator — spawns the worker threads and waits for the run to finish.
//!
//! Thin glue by design: validates the configuration (failing fast before
//! any thread exists), allocates the shared buffer and barrier once, spawns
//! one OS thread per worker, and joins them all. A worker panic is
//! surfaced as an error after the remaining workers have been joined.

use crate::aggregate::Aggregator;
use crate::barrier::TickBarrier;
use crate::buffer::EpochBuffer;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::sampler::{SampleSource, UniformSampler};
use crate::sink::{LogSink, ReportSink};
use crate::worker::{SensorWorker, WorkerRole};
use std::sync::Arc;

/// Entry point for a full engine run
pub struct Coordinator;

impl Coordinator {
    /// Run with uniform random samplers and the human-readable log sink
    pub fn run(config: &EngineConfig) -> Result<()> {
        let (min, max) = (config.reading_min, config.reading_max);
        Self::run_with(
            config,
            |_worker_id| Box::new(UniformSampler::new(min, max)),
            Box::new(LogSink::new()),
        )
    }

    /// Run with custom per-worker sample sources and report sink.
    ///
    /// `make_sampler` is called once per worker id, so each worker gets an
    /// independent generator. Blocks until all workers have completed
    /// `epoch_count * ticks_per_epoch` ticks.
    pub fn run_with<F>(
        config: &EngineConfig,
        mut make_sampler: F,
        sink: Box<dyn ReportSink>,
    ) -> Result<()>
    where
        F: FnMut(usize) -> Box<dyn SampleSource>,
    {
        config.validate()?;

        tracing::info!(
            workers = config.worker_count,
            ticks_per_epoch = config.ticks_per_epoch,
            epochs = config.epoch_count,
            "starting sampling run"
        );

        let buffer = Arc::new(EpochBuffer::new(config.worker_count, config.ticks_per_epoch));
        let barrier = Arc::new(TickBarrier::new(config.worker_count));

        let mut sink = Some(sink);
        let mut handles = Vec::with_capacity(config.worker_count);
        for worker_id in 0..config.worker_count {
            let role = if worker_id == config.designated_worker {
                WorkerRole::Designated {
                    aggregator: Aggregator::new(config.window_width, config.top_k, config.bottom_k),
                    sink: sink.take().expect("sink consumed by a second designated worker"),
                }
            } else {
                WorkerRole::Sampler
            };

            let worker = SensorWorker::new(
                worker_id,
                config,
                make_sampler(worker_id),
                buffer.clone(),
                barrier.clone(),
                role,
            );

            let handle = std::thread::Builder::new()
                .name(format!("sensor-{}", worker_id))
                .spawn(move || worker.run())
                .map_err(|e| EngineError::Worker(format!("failed to spawn worker: {}", e)))?;
            handles.push(handle);
        }

        let mut panicked = Vec::new();
        for (worker_id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                panicked.push(worker_id);
            }
        }
        if !panicked.is_empty() {
            return Err(EngineError::Worker(format!(
                "worker(s) {:?} panicked during the run",
                panicked
            )));
        }

        tracing::info!("sampling run complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::ScriptedSampler;
    use crate::sink::ChannelSink;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_invalid_config_rejected_before_spawn() {
        let config = EngineConfig {
            worker_count: 0,
            ..EngineConfig::default()
        };
        let err = Coordinator::run(&config).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_small_run_emits_every_epoch() {
        let config = EngineConfig {
            worker_count: 4,
            ticks_per_epoch: 8,
            epoch_count: 5,
            reading_min: -10,
            reading_max: 10,
            window_width: 4,
            top_k: 3,
            bottom_k: 3,
            designated_worker: 2,
        };
        let (tx, rx) = unbounded();

        Coordinator::run_with(
            &config,
            |worker_id| Box::new(UniformSampler::seeded(-10, 10, worker_id as u64)),
            Box::new(ChannelSink::new(tx)),
        )
        .unwrap();

        let epochs: Vec<u64> = rx.try_iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_scripted_run_is_deterministic() {
        let config = EngineConfig {
            worker_count: 2,
            ticks_per_epoch: 4,
            epoch_count: 2,
            reading_min: -100,
            reading_max: 100,
            window_width: 3,
            top_k: 2,
            bottom_k: 2,
            designated_worker: 0,
        };

        let run = || {
            let (tx, rx) = unbounded();
            Coordinator::run_with(
                &config,
                |worker_id| {
                    Box::new(ScriptedSampler::new(if worker_id == 0 {
                        vec![10, 20, 30, 5]
                    } else {
                        vec![-5, 15, 25, 40]
                    }))
                },
                Box::new(ChannelSink::new(tx)),
            )
            .unwrap();
            rx.try_iter()
                .map(|r| (r.epoch, r.max_difference, r.window_start))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}
