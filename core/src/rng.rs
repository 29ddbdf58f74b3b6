//! Deterministic random number generation.
//!
//! RULE: No generator may call any platform RNG.
//! All randomness flows through DatasetRng instances derived
//! from the single master seed of the generation run.
//!
//! Each dataset gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index * golden ratio). This means:
//!   - Adding a new dataset never changes existing datasets' streams.
//!   - Each dataset is fully reproducible in isolation.

use crate::types::Seed;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single dataset.
pub struct DatasetRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DatasetRng {
    /// Create a dataset RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: Seed, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform integer in [min, max], both ends inclusive.
    pub fn int_between(&mut self, min: u64, max: u64) -> u64 {
        assert!(min <= max, "empty range {min}..={max}");
        min + self.next_u64_below(max - min + 1)
    }

    /// Uniform float in [min, max).
    pub fn float_between(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// All dataset RNGs for a single generation run, indexed by stable slot.
pub struct RngBank {
    master_seed: Seed,
}

impl RngBank {
    pub fn new(master_seed: Seed) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> Seed {
        self.master_seed
    }

    pub fn for_dataset(&self, slot: DatasetSlot) -> DatasetRng {
        DatasetRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable dataset slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every dataset's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum DatasetSlot {
    MigrationFlows = 0,
    StateSnapshots = 1,
    TimeSeries = 2,
    Infodemic = 3,
    Policy = 4,
    Resilience = 5,
    Emotion = 6,
}

impl DatasetSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MigrationFlows => "migration_flows",
            Self::StateSnapshots => "state_snapshots",
            Self::TimeSeries => "time_series",
            Self::Infodemic => "infodemic",
            Self::Policy => "policy",
            Self::Resilience => "resilience",
            Self::Emotion => "emotion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_slot_same_stream() {
        let bank = RngBank::new(7);
        let mut a = bank.for_dataset(DatasetSlot::Policy);
        let mut b = bank.for_dataset(DatasetSlot::Policy);
        for _ in 0..32 {
            assert_eq!(a.next_u64_below(1_000_000), b.next_u64_below(1_000_000));
        }
    }

    #[test]
    fn slots_get_independent_streams() {
        let bank = RngBank::new(7);
        let mut a = bank.for_dataset(DatasetSlot::Policy);
        let mut b = bank.for_dataset(DatasetSlot::Emotion);
        let xs: Vec<u64> = (0..8).map(|_| a.next_u64_below(u64::MAX)).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_u64_below(u64::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn ranges_are_respected() {
        let mut rng = RngBank::new(99).for_dataset(DatasetSlot::MigrationFlows);
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..10_000 {
            let n = rng.int_between(2, 16);
            assert!((2..=16).contains(&n));
            saw_min |= n == 2;
            saw_max |= n == 16;

            let x = rng.float_between(-0.8, 0.3);
            assert!((-0.8..0.3).contains(&x));
        }
        assert!(saw_min && saw_max, "inclusive bounds never hit");
    }
}
