//! Configuration for the SensorGrid engine
//!
//! Holds the run parameters: how many workers sample in lockstep, how many
//! ticks make up an epoch, how many epochs to run, the reading range, and
//! the aggregation knobs (sliding-window width, top/bottom-K).
//!
//! Configuration is validated before any worker thread starts; a bad config
//! never reaches the concurrent part of the engine. Configs can be loaded
//! from a TOML file:
//!
//! ```ignore
//! use sensorgrid_rs::config::EngineConfig;
//!
//! let config = EngineConfig::load("grid.toml")?;
//! config.validate()?;
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of sampling workers
pub const DEFAULT_WORKER_COUNT: usize = 8;

/// Default number of ticks per epoch
pub const DEFAULT_TICKS_PER_EPOCH: usize = 60;

/// Default number of epochs per run
pub const DEFAULT_EPOCH_COUNT: usize = 24;

/// Default sliding-window width for the max-difference scan
pub const DEFAULT_WINDOW_WIDTH: usize = 10;

/// Default number of extreme readings reported at each end
pub const DEFAULT_EXTREME_COUNT: usize = 5;

/// Engine run parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of sampling workers running in lockstep
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Ticks per epoch; each worker publishes one reading per tick
    #[serde(default = "default_ticks_per_epoch")]
    pub ticks_per_epoch: usize,

    /// Number of epochs before the run terminates
    #[serde(default = "default_epoch_count")]
    pub epoch_count: usize,

    /// Inclusive lower bound for sampled readings
    pub reading_min: i64,

    /// Inclusive upper bound for sampled readings
    pub reading_max: i64,

    /// Width of the sliding window in the max-difference scan
    #[serde(default = "default_window_width")]
    pub window_width: usize,

    /// How many of the largest readings each report lists
    #[serde(default = "default_extreme_count")]
    pub top_k: usize,

    /// How many of the smallest readings each report lists
    #[serde(default = "default_extreme_count")]
    pub bottom_k: usize,

    /// Worker id responsible for compiling the per-epoch report
    #[serde(default)]
    pub designated_worker: usize,
}

fn default_worker_count() -> usize {
    DEFAULT_WORKER_COUNT
}

fn default_ticks_per_epoch() -> usize {
    DEFAULT_TICKS_PER_EPOCH
}

fn default_epoch_count() -> usize {
    DEFAULT_EPOCH_COUNT
}

fn default_window_width() -> usize {
    DEFAULT_WINDOW_WIDTH
}

fn default_extreme_count() -> usize {
    DEFAULT_EXTREME_COUNT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            ticks_per_epoch: DEFAULT_TICKS_PER_EPOCH,
            epoch_count: DEFAULT_EPOCH_COUNT,
            reading_min: -100,
            reading_max: 70,
            window_width: DEFAULT_WINDOW_WIDTH,
            top_k: DEFAULT_EXTREME_COUNT,
            bottom_k: DEFAULT_EXTREME_COUNT,
            designated_worker: 0,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save the configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| EngineError::Config(format!("Failed to write config file: {}", e)))
    }

    /// Validate the configuration, failing fast before any worker starts
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(EngineError::Config("worker_count must be >= 1".into()));
        }
        if self.epoch_count == 0 {
            return Err(EngineError::Config("epoch_count must be >= 1".into()));
        }
        if self.ticks_per_epoch == 0 {
            return Err(EngineError::Config("ticks_per_epoch must be >= 1".into()));
        }
        if self.reading_min > self.reading_max {
            return Err(EngineError::Config(format!(
                "reading_min ({}) must be <= reading_max ({})",
                self.reading_min, self.reading_max
            )));
        }
        if self.window_width == 0 || self.window_width > self.ticks_per_epoch {
            return Err(EngineError::Config(format!(
                "window_width ({}) must be in 1..={}",
                self.window_width, self.ticks_per_epoch
            )));
        }
        if self.designated_worker >= self.worker_count {
            return Err(EngineError::Config(format!(
                "designated_worker ({}) must be < worker_count ({})",
                self.designated_worker, self.worker_count
            )));
        }
        Ok(())
    }

    /// Total readings collected per epoch (buffer capacity)
    pub fn buffer_len(&self) -> usize {
        self.worker_count * self.ticks_per_epoch
    }

    /// Total ticks across the whole run
    pub fn total_ticks(&self) -> usize {
        self.ticks_per_epoch * self.epoch_count
    }
}
