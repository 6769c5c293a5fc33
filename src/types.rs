//! Core data types for the SensorGrid engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single bounded numeric sample produced by one worker in one tick.
///
/// Tagged implicitly by its (worker id, tick) position in the epoch buffer;
/// immutable once published.
pub type Reading = i64;

/// Aggregate report compiled once per epoch by the designated worker.
///
/// Constructed fresh per epoch and handed to a [`crate::sink::ReportSink`];
/// never persisted by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Epoch index this report covers (0-based, strictly increasing)
    pub epoch: u64,

    /// Largest (max - min) over any sliding window of the configured width
    pub max_difference: i64,

    /// Start index (inclusive) of the winning window in the flattened buffer
    pub window_start: usize,

    /// End index (exclusive) of the winning window
    pub window_end: usize,

    /// The K largest distinct readings, descending
    pub top: Vec<Reading>,

    /// The K smallest distinct readings, ascending
    pub bottom: Vec<Reading>,

    /// Wall-clock time the report was compiled
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Render the report as human-readable text, one line per section.
    ///
    /// This is the reference output format; structured sinks serialize the
    /// report directly instead.
    pub fn render(&self) -> String {
        let top: Vec<String> = self.top.iter().map(|r| r.to_string()).collect();
        let bottom: Vec<String> = self.bottom.iter().map(|r| r.to_string()).collect();
        format!(
            "Epoch {}: largest difference {} over window [{}, {}); top readings [{}]; bottom readings [{}]",
            self.epoch,
            self.max_difference,
            self.window_start,
            self.window_end,
            top.join(", "),
            bottom.join(", "),
        )
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            epoch: 3,
            max_difference: 45,
            window_start: 2,
            window_end: 6,
            top: vec![40, 30, 25],
            bottom: vec![-5, 5, 10],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_contains_all_sections() {
        let text = sample_report().render();
        assert!(text.contains("Epoch 3"));
        assert!(text.contains("largest difference 45"));
        assert!(text.contains("[2, 6)"));
        assert!(text.contains("40, 30, 25"));
        assert!(text.contains("-5, 5, 10"));
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
