//! Report sinks — the output boundary of the engine.
//!
//! The designated worker hands each compiled [`Report`] to a [`ReportSink`].
//! The contract is one report per epoch, delivered in epoch order; what the
//! sink does with it is its own business. Three implementations are
//! provided:
//!
//! - [`LogSink`] renders the human-readable reference text via `tracing`
//! - [`ChannelSink`] forwards reports over a crossbeam channel, for wiring
//!   the engine to another thread (or to a test harness)
//! - [`JsonLinesSink`] writes one JSON object per line to any writer

use crate::types::Report;
use crossbeam_channel::Sender;
use std::io::Write;

/// Consumer of per-epoch reports
#[cfg_attr(test, mockall::automock)]
pub trait ReportSink: Send {
    /// Accept one report. Called once per epoch, in epoch order.
    fn emit(&mut self, report: &Report);
}

/// Renders reports as human-readable log lines
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    /// Create a log sink
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for LogSink {
    fn emit(&mut self, report: &Report) {
        tracing::info!("{}", report.render());
    }
}

/// Forwards reports over a crossbeam channel.
///
/// A disconnected receiver is logged and otherwise ignored: the sampling
/// loop must not fail because a consumer went away.
pub struct ChannelSink {
    tx: Sender<Report>,
}

impl ChannelSink {
    /// Create a sink sending into `tx`
    pub fn new(tx: Sender<Report>) -> Self {
        Self { tx }
    }
}

impl ReportSink for ChannelSink {
    fn emit(&mut self, report: &Report) {
        if self.tx.send(report.clone()).is_err() {
            tracing::warn!(epoch = report.epoch, "report receiver disconnected, dropping report");
        }
    }
}

/// Writes one JSON-serialized report per line
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Create a sink writing into `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn emit(&mut self, report: &Report) {
        match serde_json::to_string(report) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{}", line) {
                    tracing::warn!(epoch = report.epoch, "failed to write report: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(epoch = report.epoch, "failed to serialize report: {}", e);
            }
        }
    }
}
