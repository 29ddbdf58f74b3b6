//! Resilience: recovery indicators per state and quarter.
//!
//! Pandemic peak quarters sample every field from a depressed range
//! (except air quality, which improves). This is a fixed policy, not
//! noise: fixtures depend on the ranges, not on the values.

use crate::{
    catalog::{is_pandemic_peak, QUARTERS, STATES},
    generator::DatasetGenerator,
    rng::{DatasetRng, DatasetSlot},
    types::{Quarter, StateName},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResilienceRecord {
    pub state:               StateName,
    pub quarter:             Quarter,
    pub economic_recovery:   f64,
    pub mobility_index:      f64,
    pub air_quality:         f64,
    pub mental_health_index: f64,
    pub employment_rate:     f64,
    pub consumer_spending:   f64,
}

/// (min, max) per field, in struct order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResilienceRanges {
    pub economic_recovery:   (f64, f64),
    pub mobility_index:      (f64, f64),
    pub air_quality:         (f64, f64),
    pub mental_health_index: (f64, f64),
    pub employment_rate:     (f64, f64),
    pub consumer_spending:   (f64, f64),
}

pub const PEAK_RANGES: ResilienceRanges = ResilienceRanges {
    economic_recovery:   (30.0, 60.0),
    mobility_index:      (20.0, 50.0),
    air_quality:         (85.0, 100.0),
    mental_health_index: (40.0, 65.0),
    employment_rate:     (75.0, 88.0),
    consumer_spending:   (50.0, 75.0),
};

pub const NORMAL_RANGES: ResilienceRanges = ResilienceRanges {
    economic_recovery:   (70.0, 100.0),
    mobility_index:      (75.0, 105.0),
    air_quality:         (60.0, 85.0),
    mental_health_index: (60.0, 85.0),
    employment_rate:     (92.0, 97.0),
    consumer_spending:   (85.0, 110.0),
};

pub fn ranges_for(quarter: &str) -> &'static ResilienceRanges {
    if is_pandemic_peak(quarter) { &PEAK_RANGES } else { &NORMAL_RANGES }
}

pub struct ResilienceGenerator;

impl DatasetGenerator for ResilienceGenerator {
    type Output = Vec<ResilienceRecord>;

    fn name(&self) -> &'static str { "resilience" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::Resilience }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<ResilienceRecord> {
        let mut draw = |(lo, hi): (f64, f64)| rng.float_between(lo, hi);
        let mut records = Vec::with_capacity(STATES.len() * QUARTERS.len());
        for state in &STATES {
            for quarter in QUARTERS {
                let r = ranges_for(quarter);
                records.push(ResilienceRecord {
                    state:               state.name.to_string(),
                    quarter:             quarter.to_string(),
                    economic_recovery:   draw(r.economic_recovery),
                    mobility_index:      draw(r.mobility_index),
                    air_quality:         draw(r.air_quality),
                    mental_health_index: draw(r.mental_health_index),
                    employment_rate:     draw(r.employment_rate),
                    consumer_spending:   draw(r.consumer_spending),
                });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngBank;

    fn within((lo, hi): (f64, f64), x: f64) -> bool {
        x >= lo && x < hi
    }

    #[test]
    fn peak_quarters_use_peak_ranges() {
        let mut rng = RngBank::new(21).for_dataset(DatasetSlot::Resilience);
        let records = ResilienceGenerator.generate(&mut rng);
        assert_eq!(records.len(), 1_000);

        for rec in &records {
            let r = ranges_for(&rec.quarter);
            assert!(within(r.economic_recovery, rec.economic_recovery));
            assert!(within(r.mobility_index, rec.mobility_index));
            assert!(within(r.air_quality, rec.air_quality));
            assert!(within(r.mental_health_index, rec.mental_health_index));
            assert!(within(r.employment_rate, rec.employment_rate));
            assert!(within(r.consumer_spending, rec.consumer_spending));
        }
    }

    #[test]
    fn peak_and_normal_employment_never_overlap() {
        let mut rng = RngBank::new(21).for_dataset(DatasetSlot::Resilience);
        for rec in ResilienceGenerator.generate(&mut rng) {
            if is_pandemic_peak(&rec.quarter) {
                assert!(rec.employment_rate < 88.0, "{} {}", rec.state, rec.quarter);
            } else {
                assert!(rec.employment_rate >= 92.0, "{} {}", rec.state, rec.quarter);
            }
        }
    }

    #[test]
    fn range_selection() {
        assert_eq!(ranges_for("2020-Q2"), &PEAK_RANGES);
        assert_eq!(ranges_for("2021-Q1"), &PEAK_RANGES);
        assert_eq!(ranges_for("2020-Q4"), &NORMAL_RANGES);
        assert_eq!(ranges_for("2019-Q1"), &NORMAL_RANGES);
    }
}
