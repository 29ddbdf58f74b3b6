//! Generator trait.
//!
//! RULE: Every dataset implements DatasetGenerator.
//! The engine calls generate() on each dataset exactly once per run,
//! in the fixed order documented in engine.rs, handing it the RNG
//! stream for its own slot.

use crate::rng::{DatasetRng, DatasetSlot};

/// The contract every dataset generator must fulfill.
pub trait DatasetGenerator {
    /// What the generator produces, usually a Vec of records.
    type Output;

    /// Unique stable name, used in logs.
    fn name(&self) -> &'static str;

    /// RNG slot this generator draws from.
    fn slot(&self) -> DatasetSlot;

    /// Expand the category tables into records.
    ///
    /// Generation is pure: no I/O, every random draw comes from `rng`.
    fn generate(&self, rng: &mut DatasetRng) -> Self::Output;
}

/// Logs a progress line every `interval` records. An interval of 0 is silent.
pub(crate) struct Progress {
    label:    &'static str,
    interval: usize,
    count:    usize,
}

impl Progress {
    pub(crate) fn new(label: &'static str, interval: usize) -> Self {
        Self { label, interval, count: 0 }
    }

    pub(crate) fn advance(&mut self, by: usize) {
        let before = self.count;
        self.count += by;
        if self.interval > 0 && before / self.interval != self.count / self.interval {
            log::info!("  generated {} {}...", self.count, self.label);
        }
    }
}
