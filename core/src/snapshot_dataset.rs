//! State snapshots: per-state migration and indicator values for the
//! target quarter, one per (state, demographic, age, occupation).

use crate::{
    catalog::{AGE_GROUPS, DEMOGRAPHICS, OCCUPATIONS, STATES, TARGET_QUARTER},
    generator::{DatasetGenerator, Progress},
    rng::{DatasetRng, DatasetSlot},
    types::{Quarter, StateName},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub state:                StateName,
    pub quarter:              Quarter,
    pub demographic:          String,
    pub age_group:            String,
    pub occupation:           String,
    pub inflow:               u64,
    pub outflow:              u64,
    /// Always `inflow - outflow`; never sampled.
    pub net_migration:        i64,
    pub covid_cases:          u64,
    pub covid_deaths:         u64,
    pub infection_rate:       f64,
    pub vaccination_rate:     f64,
    pub hospitalization_rate: f64,
    pub policy_stringency:    f64,
    pub avg_household_income: u64,
    pub unemployment_rate:    f64,
    pub cost_of_living_index: f64,
}

impl StateSnapshot {
    pub fn key(&self) -> String {
        snapshot_key(&self.state, &self.quarter, &self.demographic, &self.age_group, &self.occupation)
    }
}

/// Lookup key used in `stateData.json`.
pub fn snapshot_key(
    state: &str,
    quarter: &str,
    demographic: &str,
    age_group: &str,
    occupation: &str,
) -> String {
    format!("{state}-{quarter}-{demographic}-{age_group}-{occupation}")
}

pub fn net_migration(inflow: u64, outflow: u64) -> i64 {
    inflow as i64 - outflow as i64
}

pub struct SnapshotGenerator {
    progress_interval: usize,
}

impl SnapshotGenerator {
    pub fn new(progress_interval: usize) -> Self {
        Self { progress_interval }
    }

    fn sample(
        rng: &mut DatasetRng,
        state: &str,
        demographic: &str,
        age_group: &str,
        occupation: &str,
    ) -> StateSnapshot {
        let inflow = rng.int_between(500, 15_000);
        let outflow = rng.int_between(500, 15_000);
        StateSnapshot {
            state:                state.to_string(),
            quarter:              TARGET_QUARTER.to_string(),
            demographic:          demographic.to_string(),
            age_group:            age_group.to_string(),
            occupation:           occupation.to_string(),
            inflow,
            outflow,
            net_migration:        net_migration(inflow, outflow),
            covid_cases:          rng.int_between(1_000, 50_000),
            covid_deaths:         rng.int_between(10, 1_000),
            infection_rate:       rng.float_between(0.5, 10.0),
            vaccination_rate:     rng.float_between(60.0, 90.0),
            hospitalization_rate: rng.float_between(1.0, 8.0),
            policy_stringency:    rng.float_between(20.0, 80.0),
            avg_household_income: rng.int_between(45_000, 110_000),
            unemployment_rate:    rng.float_between(3.0, 8.0),
            cost_of_living_index: rng.float_between(85.0, 145.0),
        }
    }
}

impl DatasetGenerator for SnapshotGenerator {
    type Output = Vec<StateSnapshot>;

    fn name(&self) -> &'static str { "state_snapshots" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::StateSnapshots }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<StateSnapshot> {
        let mut snapshots =
            Vec::with_capacity(STATES.len() * DEMOGRAPHICS.len() * AGE_GROUPS.len() * OCCUPATIONS.len());
        let mut progress = Progress::new("state records", self.progress_interval);

        for state in &STATES {
            for demographic in DEMOGRAPHICS {
                for age_group in AGE_GROUPS {
                    for occupation in OCCUPATIONS {
                        snapshots.push(Self::sample(rng, state.name, demographic, age_group, occupation));
                        progress.advance(1);
                    }
                }
            }
        }
        snapshots
    }
}
