//! Time series: per-quarter migration totals for every category
//! combination, in canonical quarter order.

use crate::{
    catalog::{AGE_GROUPS, DEMOGRAPHICS, OCCUPATIONS, QUARTERS},
    generator::{DatasetGenerator, Progress},
    rng::{DatasetRng, DatasetSlot},
    types::{Magnitude, Quarter},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterPoint {
    pub quarter:         Quarter,
    pub total_migration: Magnitude,
    pub inflow:          Magnitude,
    pub outflow:         Magnitude,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub demographic: String,
    pub age_group:   String,
    pub occupation:  String,
    pub data:        Vec<QuarterPoint>,
}

impl TimeSeries {
    /// Placeholder returned when no series exists for the requested keys.
    pub fn empty(demographic: &str, age_group: &str, occupation: &str) -> Self {
        Self {
            demographic: demographic.to_string(),
            age_group:   age_group.to_string(),
            occupation:  occupation.to_string(),
            data:        Vec::new(),
        }
    }

    pub fn matches(&self, demographic: &str, age_group: &str, occupation: &str) -> bool {
        self.demographic == demographic
            && self.age_group == age_group
            && self.occupation == occupation
    }
}

/// Sampling range of the pandemic impact multiplier for a quarter.
pub fn impact_range(quarter: &str) -> (f64, f64) {
    if quarter.starts_with("2020-Q2") || quarter.starts_with("2020-Q3") {
        (2.0, 3.5)
    } else if quarter.starts_with("2020") || quarter.starts_with("2021") {
        (1.3, 2.2)
    } else {
        (0.9, 1.1)
    }
}

pub struct TimeSeriesGenerator {
    progress_interval: usize,
}

impl TimeSeriesGenerator {
    pub fn new(progress_interval: usize) -> Self {
        Self { progress_interval }
    }

    fn point(rng: &mut DatasetRng, quarter: &str) -> QuarterPoint {
        let base = rng.int_between(5_000, 50_000) as f64;
        let (lo, hi) = impact_range(quarter);
        let scaled = base * rng.float_between(lo, hi);
        QuarterPoint {
            quarter:         quarter.to_string(),
            total_migration: scaled.floor() as Magnitude,
            inflow:          (scaled * rng.float_between(0.4, 0.7)).floor() as Magnitude,
            outflow:         (scaled * rng.float_between(0.3, 0.6)).floor() as Magnitude,
        }
    }
}

impl DatasetGenerator for TimeSeriesGenerator {
    type Output = Vec<TimeSeries>;

    fn name(&self) -> &'static str { "time_series" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::TimeSeries }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<TimeSeries> {
        let mut all = Vec::with_capacity(DEMOGRAPHICS.len() * AGE_GROUPS.len() * OCCUPATIONS.len());
        let mut progress = Progress::new("time series", self.progress_interval / 10);

        for demographic in DEMOGRAPHICS {
            for age_group in AGE_GROUPS {
                for occupation in OCCUPATIONS {
                    let mut series = TimeSeries::empty(demographic, age_group, occupation);
                    series.data = QUARTERS.iter().map(|q| Self::point(rng, q)).collect();
                    all.push(series);
                    progress.advance(1);
                }
            }
        }
        all
    }
}
