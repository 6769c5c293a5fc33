//! # SensorGrid-RS: barrier-synchronized sampling and aggregation
//!
//! A fixed set of sensor workers sample one reading per discrete tick, in
//! lockstep: no worker begins tick t+1 until every worker has published its
//! reading for tick t. After each epoch (a configured number of ticks) the
//! designated worker compiles an aggregate report — the largest
//! sliding-window difference plus the top/bottom extreme readings — and
//! emits it exactly once, in epoch order.
//!
//! ## Architecture
//!
//! - **Sampler**: per-worker [`sampler::SampleSource`] instances, no shared
//!   generator state
//! - **Buffer**: one fixed [`buffer::EpochBuffer`] reused in place every
//!   epoch; each worker writes only its own slice
//! - **Barrier**: [`barrier::TickBarrier`] — the single blocking point and
//!   the memory-visibility boundary for published readings
//! - **Aggregator**: [`aggregate::Aggregator`] with an epoch-sequence
//!   guard for exactly-once compilation
//! - **Sinks**: [`sink::ReportSink`] implementations for logs, channels,
//!   and JSON lines
//! - **Coordinator**: spawns one OS thread per worker and joins the run
//!
//! ## Example
//!
//! ```no_run
//! use sensorgrid_rs::{config::EngineConfig, coordinator::Coordinator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::default();
//!     Coordinator::run(&config)?;
//!     Ok(())
//! }
//! ```
//!
//! The [`tagset`] module carries the companion concurrent sorted-tag
//! collection, which shares the engine's locking discipline but not its
//! barrier.

pub mod aggregate;
pub mod barrier;
pub mod buffer;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod sampler;
pub mod sink;
pub mod tagset;
pub mod types;
pub mod worker;

// Re-export commonly used types
pub use aggregate::Aggregator;
pub use barrier::TickBarrier;
pub use buffer::EpochBuffer;
pub use config::EngineConfig;
pub use coordinator::Coordinator;
pub use error::{EngineError, Result};
pub use sampler::{SampleSource, ScriptedSampler, UniformSampler};
pub use sink::{ChannelSink, JsonLinesSink, LogSink, ReportSink};
pub use tagset::SortedTagSet;
pub use types::{Reading, Report};
pub use worker::{SensorWorker, WorkerRole};
