//! Epoch aggregation — sliding-window scan and extreme readings.
//!
//! The [`Aggregator`] consumes a completed epoch's buffer snapshot and
//! produces one [`Report`]. It is exactly-once *per epoch*, not per call
//! site: an internal epoch-sequence guard turns any call whose epoch index
//! is not strictly greater than the last compiled one into a no-op, so a
//! defensive duplicate invocation can never emit a duplicate report.
//!
//! The scan runs over the worker-major flattened buffer
//! (`worker_id * ticks_per_epoch + tick`), so windows near a slice boundary
//! span the end of one worker's ticks and the start of the next worker's.
//!
//! Extreme readings are deduplicated: equal readings count once, matching
//! an ordered-set selection rather than a full multiset sort.

use crate::types::{Reading, Report};
use chrono::Utc;
use std::collections::{BTreeSet, VecDeque};

/// Result of the sliding-window max-difference scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDiff {
    /// Largest (max - min) found in any window
    pub difference: i64,
    /// Start index (inclusive) of the winning window
    pub start: usize,
    /// End index (exclusive) of the winning window
    pub end: usize,
}

/// Scan every contiguous window of `width` readings and return the window
/// with the strictly largest (max - min), earliest start winning ties.
///
/// Uses monotonic deques for the window extrema, so the scan is O(n) rather
/// than O(n * width). Returns `None` when the input is shorter than the
/// window or the width is zero.
pub fn sliding_max_difference(readings: &[Reading], width: usize) -> Option<WindowDiff> {
    if width == 0 || readings.len() < width {
        return None;
    }

    // Indices of window maxima (values descending) and minima (ascending).
    let mut max_idx: VecDeque<usize> = VecDeque::new();
    let mut min_idx: VecDeque<usize> = VecDeque::new();
    let mut best: Option<WindowDiff> = None;

    for i in 0..readings.len() {
        while max_idx.back().is_some_and(|&b| readings[b] <= readings[i]) {
            max_idx.pop_back();
        }
        max_idx.push_back(i);

        while min_idx.back().is_some_and(|&b| readings[b] >= readings[i]) {
            min_idx.pop_back();
        }
        min_idx.push_back(i);

        if i + 1 >= width {
            let start = i + 1 - width;
            while max_idx.front().is_some_and(|&f| f < start) {
                max_idx.pop_front();
            }
            while min_idx.front().is_some_and(|&f| f < start) {
                min_idx.pop_front();
            }

            let difference = readings[*max_idx.front().expect("max deque never empty")]
                - readings[*min_idx.front().expect("min deque never empty")];

            // Strictly greater: windows scan in start order, so ties keep
            // the earliest start.
            if best.is_none_or(|b| difference > b.difference) {
                best = Some(WindowDiff {
                    difference,
                    start,
                    end: start + width,
                });
            }
        }
    }

    best
}

/// Select the `top_k` largest and `bottom_k` smallest distinct readings.
///
/// Top is returned descending, bottom ascending. Duplicates collapse to a
/// single entry.
pub fn extreme_readings(
    readings: &[Reading],
    top_k: usize,
    bottom_k: usize,
) -> (Vec<Reading>, Vec<Reading>) {
    let distinct: BTreeSet<Reading> = readings.iter().copied().collect();
    let top: Vec<Reading> = distinct.iter().rev().take(top_k).copied().collect();
    let bottom: Vec<Reading> = distinct.iter().take(bottom_k).copied().collect();
    (top, bottom)
}

/// Compiles one report per epoch, exactly once per epoch
pub struct Aggregator {
    window_width: usize,
    top_k: usize,
    bottom_k: usize,
    /// Highest epoch index already compiled; -1 before the first epoch
    last_compiled: i64,
}

impl Aggregator {
    /// Create an aggregator with the given scan parameters
    pub fn new(window_width: usize, top_k: usize, bottom_k: usize) -> Self {
        Self {
            window_width,
            top_k,
            bottom_k,
            last_compiled: -1,
        }
    }

    /// Epoch index of the most recent compiled report, if any
    pub fn last_compiled_epoch(&self) -> Option<u64> {
        u64::try_from(self.last_compiled).ok()
    }

    /// Compile the report for `epoch` from a completed buffer snapshot.
    ///
    /// Returns `None` when `epoch` is not strictly greater than the last
    /// compiled epoch — the call is a no-op and mutates nothing. This guard
    /// is what makes compilation exactly-once even if the call site is
    /// reached more than once for the same epoch.
    pub fn compile(&mut self, epoch: u64, readings: &[Reading]) -> Option<Report> {
        if (epoch as i64) <= self.last_compiled {
            tracing::debug!(epoch, last = self.last_compiled, "epoch already compiled, skipping");
            return None;
        }
        self.last_compiled = epoch as i64;

        let window = sliding_max_difference(readings, self.window_width)
            .expect("buffer shorter than window width; config validation should prevent this");
        let (top, bottom) = extreme_readings(readings, self.top_k, self.bottom_k);

        Some(Report {
            epoch,
            max_difference: window.difference,
            window_start: window.start,
            window_end: window.end,
            top,
            bottom,
            generated_at: Utc::now(),
        })
    }
}
