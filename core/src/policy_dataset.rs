//! Policy: lockdown stringency per state and quarter.
//!
//! Only `stringency` and `duration` are random. Every flag and the
//! lockdown level are pure functions of stringency through the fixed
//! cutoffs below. All comparisons are strict.

use crate::{
    catalog::{QUARTERS, STATES},
    generator::DatasetGenerator,
    rng::{DatasetRng, DatasetSlot},
    types::{Quarter, StateName},
};
use serde::{Deserialize, Serialize};

pub const STRINGENCY_MIN: f64 = 20.0;
pub const STRINGENCY_MAX: f64 = 95.0;

pub const STRICT_ABOVE: f64 = 70.0;
pub const MODERATE_ABOVE: f64 = 40.0;
pub const MASK_MANDATE_ABOVE: f64 = 50.0;
pub const BUSINESS_RESTRICTIONS_ABOVE: f64 = 60.0;
pub const TRAVEL_RESTRICTIONS_ABOVE: f64 = 55.0;
pub const GATHERING_LIMITS_ABOVE: f64 = 45.0;
pub const SCHOOL_CLOSURE_ABOVE: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockdownLevel {
    Minimal,
    Moderate,
    Strict,
}

impl LockdownLevel {
    pub fn from_stringency(stringency: f64) -> Self {
        if stringency > STRICT_ABOVE {
            Self::Strict
        } else if stringency > MODERATE_ABOVE {
            Self::Moderate
        } else {
            Self::Minimal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub state:                 StateName,
    pub quarter:               Quarter,
    pub stringency:            f64,
    pub lockdown_level:        LockdownLevel,
    pub mask_mandate:          bool,
    pub business_restrictions: bool,
    pub travel_restrictions:   bool,
    pub gathering_limits:      bool,
    pub school_closure:        bool,
    /// Weeks the measures stayed in force.
    pub duration:              u64,
}

impl PolicyRecord {
    pub fn from_stringency(state: &str, quarter: &str, stringency: f64, duration: u64) -> Self {
        Self {
            state:                 state.to_string(),
            quarter:               quarter.to_string(),
            stringency,
            lockdown_level:        LockdownLevel::from_stringency(stringency),
            mask_mandate:          stringency > MASK_MANDATE_ABOVE,
            business_restrictions: stringency > BUSINESS_RESTRICTIONS_ABOVE,
            travel_restrictions:   stringency > TRAVEL_RESTRICTIONS_ABOVE,
            gathering_limits:      stringency > GATHERING_LIMITS_ABOVE,
            school_closure:        stringency > SCHOOL_CLOSURE_ABOVE,
            duration,
        }
    }

    /// True when the derived fields agree with `stringency`.
    pub fn is_consistent(&self) -> bool {
        *self == Self::from_stringency(&self.state, &self.quarter, self.stringency, self.duration)
    }
}

pub struct PolicyGenerator;

impl DatasetGenerator for PolicyGenerator {
    type Output = Vec<PolicyRecord>;

    fn name(&self) -> &'static str { "policy" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::Policy }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<PolicyRecord> {
        let mut records = Vec::with_capacity(STATES.len() * QUARTERS.len());
        for state in &STATES {
            for quarter in QUARTERS {
                let stringency = rng.float_between(STRINGENCY_MIN, STRINGENCY_MAX);
                let duration = rng.int_between(2, 16);
                records.push(PolicyRecord::from_stringency(state.name, quarter, stringency, duration));
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngBank;

    fn at(stringency: f64) -> PolicyRecord {
        PolicyRecord::from_stringency("Ohio", "2020-Q2", stringency, 4)
    }

    #[test]
    fn strict_threshold_is_exclusive() {
        let below = at(69.9);
        assert_eq!(below.lockdown_level, LockdownLevel::Moderate);
        assert!(!below.school_closure);

        let on = at(70.0);
        assert_eq!(on.lockdown_level, LockdownLevel::Moderate);
        assert!(!on.school_closure);

        let above = at(70.1);
        assert_eq!(above.lockdown_level, LockdownLevel::Strict);
        assert!(above.school_closure);
    }

    #[test]
    fn seventy_five_is_strict_with_everything_on() {
        let p = at(75.0);
        assert_eq!(p.lockdown_level, LockdownLevel::Strict);
        assert!(p.mask_mandate);
        assert!(p.business_restrictions);
        assert!(p.travel_restrictions);
        assert!(p.gathering_limits);
        assert!(p.school_closure);
    }

    #[test]
    fn forty_five_is_moderate_without_mask_mandate() {
        let p = at(45.0);
        assert_eq!(p.lockdown_level, LockdownLevel::Moderate);
        assert!(!p.mask_mandate);
        assert!(!p.gathering_limits, "45 is not above 45");
        assert!(!p.travel_restrictions);
        assert!(!p.business_restrictions);
        assert!(!p.school_closure);
    }

    #[test]
    fn flag_cutoffs() {
        assert_eq!(at(40.0).lockdown_level, LockdownLevel::Minimal);
        assert_eq!(at(40.1).lockdown_level, LockdownLevel::Moderate);
        assert!(at(45.1).gathering_limits);
        assert!(!at(50.0).mask_mandate);
        assert!(at(50.1).mask_mandate);
        assert!(!at(55.0).travel_restrictions);
        assert!(at(55.1).travel_restrictions);
        assert!(!at(60.0).business_restrictions);
        assert!(at(60.1).business_restrictions);
        assert_eq!(at(20.0).lockdown_level, LockdownLevel::Minimal);
    }

    #[test]
    fn generated_records_are_consistent() {
        let mut rng = RngBank::new(8).for_dataset(DatasetSlot::Policy);
        let records = PolicyGenerator.generate(&mut rng);
        assert_eq!(records.len(), 1_000);
        for r in &records {
            assert!(r.is_consistent());
            assert!((STRINGENCY_MIN..STRINGENCY_MAX).contains(&r.stringency));
            assert!((2..=16).contains(&r.duration));
        }
    }

    #[test]
    fn lockdown_level_serializes_lowercase() {
        let json = serde_json::to_value(at(80.0)).unwrap();
        assert_eq!(json["lockdownLevel"], "strict");
        assert_eq!(json["schoolClosure"], true);
    }
}
