//! Migration flows: one record per (route, demographic, age, occupation,
//! gender).
//!
//! Flows carry a single aggregate quarter tag ("all"). They are not
//! quarter-resolved; per-quarter totals live in the time series dataset,
//! which draws from an unrelated random model.

use crate::{
    catalog::{self, StateEntry, AGE_GROUPS, ALL, DEMOGRAPHICS, MAJOR_ROUTES, OCCUPATIONS},
    generator::{DatasetGenerator, Progress},
    rng::{DatasetRng, DatasetSlot},
    types::{Magnitude, Quarter, StateName},
};
use serde::{Deserialize, Serialize};

pub const BASE_FLOW_MIN: u64 = 100;
pub const BASE_FLOW_MAX: u64 = 5_000;
pub const PANDEMIC_MULTIPLIER_MIN: f64 = 1.5;
pub const PANDEMIC_MULTIPLIER_MAX: f64 = 2.5;
pub const MALE_SHARE: f64 = 0.52;
pub const FEMALE_SHARE: f64 = 0.48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    All,
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All    => "all",
            Self::Male   => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationFlow {
    pub from:       StateName,
    pub to:         StateName,
    pub from_lat:   f64,
    pub from_lon:   f64,
    pub to_lat:     f64,
    pub to_lon:     f64,
    pub value:      Magnitude,
    pub demographic: String,
    pub age_group:  String,
    pub occupation: String,
    pub quarter:    Quarter,
    pub gender:     Gender,
}

/// One category combination on one route, before the gender split.
#[derive(Debug, Clone, Copy)]
pub struct FlowCombination<'a> {
    pub from:        &'a StateEntry,
    pub to:          &'a StateEntry,
    pub demographic: &'a str,
    pub age_group:   &'a str,
    pub occupation:  &'a str,
}

/// Expand one combination into its all/male/female records.
///
/// The gender records are fixed shares of the same unrounded
/// `base * multiplier`, so `male + female` never exceeds `all` by more
/// than the rounding of each term.
pub fn flow_triple(combo: FlowCombination<'_>, base: u64, multiplier: f64) -> [MigrationFlow; 3] {
    let scaled = base as f64 * multiplier;
    let record = |gender: Gender, value: f64| MigrationFlow {
        from:        combo.from.name.to_string(),
        to:          combo.to.name.to_string(),
        from_lat:    combo.from.lat,
        from_lon:    combo.from.lon,
        to_lat:      combo.to.lat,
        to_lon:      combo.to.lon,
        value:       value.floor() as Magnitude,
        demographic: combo.demographic.to_string(),
        age_group:   combo.age_group.to_string(),
        occupation:  combo.occupation.to_string(),
        quarter:     ALL.to_string(),
        gender,
    };
    [
        record(Gender::All, scaled),
        record(Gender::Male, scaled * MALE_SHARE),
        record(Gender::Female, scaled * FEMALE_SHARE),
    ]
}

pub struct FlowGenerator {
    progress_interval: usize,
}

impl FlowGenerator {
    pub fn new(progress_interval: usize) -> Self {
        Self { progress_interval }
    }
}

impl DatasetGenerator for FlowGenerator {
    type Output = Vec<MigrationFlow>;

    fn name(&self) -> &'static str { "migration_flows" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::MigrationFlows }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<MigrationFlow> {
        let capacity =
            MAJOR_ROUTES.len() * DEMOGRAPHICS.len() * AGE_GROUPS.len() * OCCUPATIONS.len() * 3;
        let mut flows = Vec::with_capacity(capacity);
        let mut progress = Progress::new("flows", self.progress_interval);

        for (from_name, to_name) in MAJOR_ROUTES {
            let (Some(from), Some(to)) = (catalog::state(from_name), catalog::state(to_name)) else {
                log::warn!("skipping route {from_name} -> {to_name}: unknown state");
                continue;
            };
            for demographic in DEMOGRAPHICS {
                for age_group in AGE_GROUPS {
                    for occupation in OCCUPATIONS {
                        let base = rng.int_between(BASE_FLOW_MIN, BASE_FLOW_MAX);
                        let multiplier =
                            rng.float_between(PANDEMIC_MULTIPLIER_MIN, PANDEMIC_MULTIPLIER_MAX);
                        let combo = FlowCombination { from, to, demographic, age_group, occupation };
                        flows.extend(flow_triple(combo, base, multiplier));
                        progress.advance(3);
                    }
                }
            }
        }
        flows
    }
}
