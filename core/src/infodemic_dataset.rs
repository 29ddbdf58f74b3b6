//! Infodemic: misinformation and sentiment indicators per state and quarter.

use crate::{
    catalog::{QUARTERS, STATES},
    generator::DatasetGenerator,
    rng::{DatasetRng, DatasetSlot},
    types::{Quarter, StateName},
};
use serde::{Deserialize, Serialize};

pub const MISINFO_TOPICS: [&str; 3] = ["vaccine myths", "lockdown conspiracy", "mask ineffectiveness"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfodemicRecord {
    pub state:                 StateName,
    pub quarter:               Quarter,
    pub covid_cases:           u64,
    pub misinformation_index:  f64,
    pub social_media_activity: u64,
    pub fact_checking_rate:    f64,
    pub top_misinfo:           String,
    pub sentiment:             f64,
}

pub struct InfodemicGenerator;

impl DatasetGenerator for InfodemicGenerator {
    type Output = Vec<InfodemicRecord>;

    fn name(&self) -> &'static str { "infodemic" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::Infodemic }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<InfodemicRecord> {
        let mut records = Vec::with_capacity(STATES.len() * QUARTERS.len());
        for state in &STATES {
            for quarter in QUARTERS {
                records.push(InfodemicRecord {
                    state:                 state.name.to_string(),
                    quarter:               quarter.to_string(),
                    covid_cases:           rng.int_between(1_000, 100_000),
                    misinformation_index:  rng.float_between(20.0, 95.0),
                    social_media_activity: rng.int_between(10_000, 500_000),
                    fact_checking_rate:    rng.float_between(10.0, 60.0),
                    top_misinfo:           rng.pick(&MISINFO_TOPICS).to_string(),
                    sentiment:             rng.float_between(-0.8, 0.3),
                });
            }
        }
        records
    }
}
