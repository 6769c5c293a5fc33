//! Error handling for the SensorGrid engine
//!
//! This module defines custom error types and a Result alias for use
//! throughout the engine.
//!
//! Two failure classes from the design deliberately do *not* appear here:
//!
//! - A worker that never arrives at the tick barrier hangs every other
//!   worker. There is no timeout and no detection; this is a documented
//!   limitation, surfaced only by external liveness monitoring.
//! - Duplicate aggregation is prevented structurally by the epoch-sequence
//!   guard in [`crate::aggregate::Aggregator`] and is never an error.
//!
//! Buffer index misuse (e.g. a worker id outside the configured range) is a
//! programming error and panics loudly rather than being reported.

use thiserror::Error;

/// Main error type for SensorGrid operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Errors related to configuration loading/validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Errors related to worker threads (spawn/join failures)
    #[error("Worker error: {0}")]
    Worker(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EngineError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for SensorGrid operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
