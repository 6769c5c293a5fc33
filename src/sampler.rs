//! Sample sources for the sampling workers
//!
//! Each worker owns its own [`SampleSource`] instance. Generators are never
//! shared across workers: sharing one would serialize the draws behind a
//! lock and make cross-worker interleaving nondeterministic for no benefit.
//!
//! [`UniformSampler`] is the production source. [`ScriptedSampler`] replays
//! a fixed sequence and exists so tests can inject known readings through
//! the same seam, mirroring how the rest of the engine is tested against
//! deterministic inputs.

use crate::types::Reading;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of one reading per call.
///
/// Implementations may keep internal generator state but must have no other
/// side effects.
pub trait SampleSource: Send {
    /// Produce the next reading
    fn next_reading(&mut self) -> Reading;
}

/// Draws readings uniformly from an inclusive range
pub struct UniformSampler {
    rng: StdRng,
    min: Reading,
    max: Reading,
}

impl UniformSampler {
    /// Create a sampler over `[min, max]` seeded from the OS
    pub fn new(min: Reading, max: Reading) -> Self {
        debug_assert!(min <= max);
        Self {
            rng: StdRng::from_os_rng(),
            min,
            max,
        }
    }

    /// Create a sampler with a fixed seed, for reproducible runs
    pub fn seeded(min: Reading, max: Reading, seed: u64) -> Self {
        debug_assert!(min <= max);
        Self {
            rng: StdRng::seed_from_u64(seed),
            min,
            max,
        }
    }
}

impl SampleSource for UniformSampler {
    fn next_reading(&mut self) -> Reading {
        self.rng.random_range(self.min..=self.max)
    }
}

/// Replays a fixed sequence of readings, wrapping around when exhausted
pub struct ScriptedSampler {
    script: Vec<Reading>,
    cursor: usize,
}

impl ScriptedSampler {
    /// Create a sampler that replays `script` in order
    pub fn new(script: Vec<Reading>) -> Self {
        assert!(!script.is_empty(), "scripted sampler needs at least one reading");
        Self { script, cursor: 0 }
    }
}

impl SampleSource for ScriptedSampler {
    fn next_reading(&mut self) -> Reading {
        let reading = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        reading
    }
}
