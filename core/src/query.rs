//! Filter/aggregate operations over a loaded MigrationDataset.
//!
//! Every operation is a pure read. Unknown category values are not
//! rejected; they simply match nothing. A no-match query is never an
//! error: it yields an empty list, an empty map, or a placeholder.

use crate::{
    catalog::{ALL, ALL_AGES, ALL_DEMOGRAPHICS, ALL_OCCUPATIONS, QUARTERS, TARGET_QUARTER},
    config::QueryLimits,
    dataset::{CollectionCounts, MigrationDataset},
    emotion_dataset::EmotionRecord,
    flow_dataset::{Gender, MigrationFlow},
    infodemic_dataset::InfodemicRecord,
    policy_dataset::PolicyRecord,
    resilience_dataset::ResilienceRecord,
    snapshot_dataset::{snapshot_key, StateSnapshot},
    time_series_dataset::TimeSeries,
    types::Magnitude,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw query parameters as they arrive from a client.
pub type QueryParams = BTreeMap<String, String>;

fn param<'a>(params: &'a QueryParams, key: &str, default: &'a str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or(default)
}

/// Parse a non-negative integer threshold. Anything unparseable is 0.
pub fn parse_min_flow(raw: Option<&str>) -> Magnitude {
    let Some(raw) = raw.map(str::trim) else { return 0 };
    if let Ok(n) = raw.parse::<Magnitude>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() && x > 0.0 => x.trunc() as Magnitude,
        Ok(_) => 0,
        Err(_) => {
            log::warn!("ignoring malformed minFlow {raw:?}; using 0");
            0
        }
    }
}

/// Parse a float threshold. Anything unparseable or non-finite is 0.0.
pub fn parse_min_stringency(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.map(str::trim) else { return 0.0 };
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() => x,
        _ => {
            log::warn!("ignoring malformed minStringency {raw:?}; using 0");
            0.0
        }
    }
}

// ── Filters ────────────────────────────────────────────────────────

/// Demographic / age / occupation selection.
///
/// As a filter, the "All …" values are wildcards. As a lookup key (state
/// summary, time series) they name the aggregate category itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    pub demographic: String,
    pub age_group:   String,
    pub occupation:  String,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            demographic: ALL_DEMOGRAPHICS.to_string(),
            age_group:   ALL_AGES.to_string(),
            occupation:  ALL_OCCUPATIONS.to_string(),
        }
    }
}

impl CategoryFilter {
    pub fn new(demographic: &str, age_group: &str, occupation: &str) -> Self {
        Self {
            demographic: demographic.to_string(),
            age_group:   age_group.to_string(),
            occupation:  occupation.to_string(),
        }
    }

    pub fn from_params(params: &QueryParams) -> Self {
        Self::new(
            param(params, "demographic", ALL_DEMOGRAPHICS),
            param(params, "ageGroup", ALL_AGES),
            param(params, "occupation", ALL_OCCUPATIONS),
        )
    }

    /// Wildcard-aware match against a flow's categories.
    pub fn admits(&self, flow: &MigrationFlow) -> bool {
        (self.demographic == ALL_DEMOGRAPHICS || flow.demographic == self.demographic)
            && (self.age_group == ALL_AGES || flow.age_group == self.age_group)
            && (self.occupation == ALL_OCCUPATIONS || flow.occupation == self.occupation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowQuery {
    pub categories: CategoryFilter,
    /// "all", "male" or "female".
    pub gender:     String,
    pub min_flow:   Magnitude,
}

impl Default for FlowQuery {
    fn default() -> Self {
        Self {
            categories: CategoryFilter::default(),
            gender:     ALL.to_string(),
            min_flow:   0,
        }
    }
}

impl FlowQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            categories: CategoryFilter::from_params(params),
            gender:     param(params, "gender", ALL).to_string(),
            min_flow:   parse_min_flow(params.get("minFlow").map(String::as_str)),
        }
    }

    pub fn admits(&self, flow: &MigrationFlow) -> bool {
        self.categories.admits(flow)
            && (self.gender == ALL || flow.gender.as_str() == self.gender)
            && flow.value >= self.min_flow
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub state:          String,
    pub quarter:        String,
    /// Only consulted by records that carry a stringency.
    pub min_stringency: f64,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            state:          ALL.to_string(),
            quarter:        ALL.to_string(),
            min_stringency: 0.0,
        }
    }
}

impl RecordQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            state:          param(params, "state", ALL).to_string(),
            quarter:        param(params, "quarter", ALL).to_string(),
            min_stringency: parse_min_stringency(params.get("minStringency").map(String::as_str)),
        }
    }

    pub fn admits<R: StateQuarterRecord>(&self, record: &R) -> bool {
        if self.state != ALL && record.state() != self.state {
            return false;
        }
        if self.quarter != ALL && record.quarter() != self.quarter {
            return false;
        }
        match record.stringency() {
            Some(s) => s >= self.min_stringency,
            None => true,
        }
    }
}

/// Records keyed by (state, quarter).
pub trait StateQuarterRecord {
    fn state(&self) -> &str;
    fn quarter(&self) -> &str;

    /// Value compared against `minStringency`, if the record has one.
    fn stringency(&self) -> Option<f64> {
        None
    }
}

macro_rules! state_quarter_record {
    ($($ty:ty),* $(,)?) => {
        $(impl StateQuarterRecord for $ty {
            fn state(&self) -> &str { &self.state }
            fn quarter(&self) -> &str { &self.quarter }
        })*
    };
}

state_quarter_record!(InfodemicRecord, ResilienceRecord, EmotionRecord);

impl StateQuarterRecord for PolicyRecord {
    fn state(&self) -> &str { &self.state }
    fn quarter(&self) -> &str { &self.quarter }
    fn stringency(&self) -> Option<f64> { Some(self.stringency) }
}

// ── Operations ─────────────────────────────────────────────────────

/// Matching flows, largest first, at most `max_flows`.
pub fn list_flows<'a>(
    data: &'a MigrationDataset,
    query: &FlowQuery,
    limits: &QueryLimits,
) -> Vec<&'a MigrationFlow> {
    let mut matched: Vec<&MigrationFlow> = data.flows.iter().filter(|f| query.admits(*f)).collect();
    // Stable: equal magnitudes keep generation order.
    matched.sort_by(|a, b| b.value.cmp(&a.value));
    matched.truncate(limits.max_flows);
    matched
}

/// Matching records in generation order, at most `max_records`.
pub fn list_records<'a, R: StateQuarterRecord>(
    records: &'a [R],
    query: &RecordQuery,
    limits: &QueryLimits,
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| query.admits(*r))
        .take(limits.max_records)
        .collect()
}

/// A state snapshot merged with the state's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    #[serde(flatten)]
    pub snapshot:   StateSnapshot,
    pub abbr:       String,
    pub lat:        f64,
    pub lon:        f64,
    pub population: u64,
}

/// Target-quarter snapshot per state for one category combination.
///
/// States with no snapshot are left out rather than zero-filled: absence
/// means missing data, not zero migration.
pub fn state_summary(data: &MigrationDataset, categories: &CategoryFilter) -> BTreeMap<String, StateSummary> {
    data.states
        .iter()
        .filter_map(|(name, info)| {
            let key = snapshot_key(
                name,
                TARGET_QUARTER,
                &categories.demographic,
                &categories.age_group,
                &categories.occupation,
            );
            let snapshot = data.state_data.get(&key)?;
            Some((
                name.clone(),
                StateSummary {
                    snapshot:   StateSnapshot { state: name.clone(), ..snapshot.clone() },
                    abbr:       info.abbr.clone(),
                    lat:        info.lat,
                    lon:        info.lon,
                    population: info.population,
                },
            ))
        })
        .collect()
}

/// The series for an exact category triple, or an empty placeholder that
/// echoes the requested keys.
pub fn time_series(data: &MigrationDataset, categories: &CategoryFilter) -> TimeSeries {
    data.time_series
        .iter()
        .find(|s| s.matches(&categories.demographic, &categories.age_group, &categories.occupation))
        .cloned()
        .unwrap_or_else(|| {
            TimeSeries::empty(&categories.demographic, &categories.age_group, &categories.occupation)
        })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderTotals {
    pub male:   Magnitude,
    pub female: Magnitude,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsBreakdown {
    pub by_demographic: BTreeMap<String, Magnitude>,
    pub by_age:         BTreeMap<String, Magnitude>,
    pub by_occupation:  BTreeMap<String, Magnitude>,
    pub by_gender:      GenderTotals,
}

/// Summed flow magnitude per category.
///
/// Only the first `breakdown_sample` flows are summed. This is a
/// deliberate approximation: records past the prefix never contribute,
/// and summing the full collection is a different operation.
pub fn demographics_breakdown(data: &MigrationDataset, limits: &QueryLimits) -> DemographicsBreakdown {
    let mut breakdown = DemographicsBreakdown::default();
    for flow in data.flows.iter().take(limits.breakdown_sample) {
        *breakdown.by_demographic.entry(flow.demographic.clone()).or_default() += flow.value;
        *breakdown.by_age.entry(flow.age_group.clone()).or_default() += flow.value;
        *breakdown.by_occupation.entry(flow.occupation.clone()).or_default() += flow.value;
        match flow.gender {
            Gender::Male   => breakdown.by_gender.male += flow.value,
            Gender::Female => breakdown.by_gender.female += flow.value,
            Gender::All    => {}
        }
    }
    breakdown
}

pub fn quarters() -> &'static [&'static str] {
    &QUARTERS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status:      &'static str,
    pub data_loaded: CollectionCounts,
}

/// Only reachable once loading finished, so the status is always "ok";
/// the counts distinguish "ready" from "ready but empty".
pub fn health(data: &MigrationDataset) -> HealthReport {
    HealthReport {
        status:      "ok",
        data_loaded: data.counts(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn min_flow_parsing_defaults_to_zero() {
        assert_eq!(parse_min_flow(None), 0);
        assert_eq!(parse_min_flow(Some("250")), 250);
        assert_eq!(parse_min_flow(Some(" 250 ")), 250);
        assert_eq!(parse_min_flow(Some("250.9")), 250);
        assert_eq!(parse_min_flow(Some("-5")), 0);
        assert_eq!(parse_min_flow(Some("lots")), 0);
        assert_eq!(parse_min_flow(Some("")), 0);
    }

    #[test]
    fn min_stringency_parsing_defaults_to_zero() {
        assert_eq!(parse_min_stringency(Some("62.5")), 62.5);
        assert_eq!(parse_min_stringency(Some("NaN")), 0.0);
        assert_eq!(parse_min_stringency(Some("high")), 0.0);
        assert_eq!(parse_min_stringency(None), 0.0);
    }

    #[test]
    fn missing_params_become_wildcards() {
        let q = FlowQuery::from_params(&QueryParams::new());
        assert_eq!(q, FlowQuery::default());

        let r = RecordQuery::from_params(&params(&[("state", "Ohio"), ("minStringency", "x")]));
        assert_eq!(r.state, "Ohio");
        assert_eq!(r.quarter, "all");
        assert_eq!(r.min_stringency, 0.0);
    }

    #[test]
    fn record_query_applies_stringency_only_to_policies() {
        let q = RecordQuery { min_stringency: 80.0, ..RecordQuery::default() };
        let lax = PolicyRecord::from_stringency("Ohio", "2020-Q1", 30.0, 3);
        let tight = PolicyRecord::from_stringency("Ohio", "2020-Q1", 80.0, 3);
        assert!(!q.admits(&lax));
        assert!(q.admits(&tight));

        let emotion = EmotionRecord {
            state:            "Ohio".into(),
            quarter:          "2020-Q1".into(),
            fear:             1.0,
            anger:            1.0,
            sadness:          1.0,
            hope:             1.0,
            anxiety:          1.0,
            fatigue:          1.0,
            dominant_emotion: "hope".into(),
        };
        assert!(q.admits(&emotion));
    }
}
