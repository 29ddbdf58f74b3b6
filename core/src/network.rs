//! Graph views for the force and causality visualizations.

use crate::{
    catalog::TARGET_QUARTER,
    config::QueryLimits,
    dataset::MigrationDataset,
    query::{CategoryFilter, QueryParams},
    snapshot_dataset::snapshot_key,
    types::{Magnitude, StateName},
};
use serde::Serialize;

// Fallbacks for states with no snapshot. Chosen so a missing state sits
// in the middle of the force layout instead of collapsing to zero.
const DEFAULT_INFECTION_RATE: f64 = 50.0;
const DEFAULT_EMPLOYMENT_RATE: f64 = 60.0;
const DEFAULT_POLICY_STRINGENCY: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GravityNode {
    pub id:                StateName,
    pub abbr:              String,
    pub lat:               f64,
    pub lon:               f64,
    pub population:        u64,
    pub net_migration:     i64,
    pub infection_rate:    f64,
    pub employment_rate:   f64,
    pub policy_stringency: f64,
    /// Repulsion, 0–1.
    pub covid_force:       f64,
    /// Attraction, 0–1.
    pub economic_force:    f64,
    /// Repulsion, 0–0.5.
    pub policy_force:      f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravityEdge {
    pub source:      StateName,
    pub target:      StateName,
    pub value:       Magnitude,
    pub demographic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravityNetwork {
    pub nodes: Vec<GravityNode>,
    pub edges: Vec<GravityEdge>,
}

/// Every state as a node, plus flows above the minimum magnitude as edges.
///
/// Edges are the first `network_edge_limit` matching flows in generation
/// order, not the largest ones. Gender is not filtered.
///
/// Snapshots carry no employment rate, so a node's `employmentRate` is
/// `100 - unemploymentRate` of its snapshot. This makes `economicForce`
/// vary per state (roughly 0.92 to 0.97) instead of sitting at the 0.6
/// fallback for every node; only states without a snapshot use 60.
pub fn gravity_network(
    data: &MigrationDataset,
    categories: &CategoryFilter,
    quarter: &str,
    limits: &QueryLimits,
) -> GravityNetwork {
    let nodes = data
        .states
        .iter()
        .map(|(name, info)| {
            let key = snapshot_key(
                name,
                quarter,
                &categories.demographic,
                &categories.age_group,
                &categories.occupation,
            );
            let snapshot = data.state_data.get(&key);
            let infection_rate = snapshot.map_or(DEFAULT_INFECTION_RATE, |s| s.infection_rate);
            let employment_rate =
                snapshot.map_or(DEFAULT_EMPLOYMENT_RATE, |s| 100.0 - s.unemployment_rate);
            let policy_stringency = snapshot.map_or(DEFAULT_POLICY_STRINGENCY, |s| s.policy_stringency);
            GravityNode {
                id:                name.clone(),
                abbr:              info.abbr.clone(),
                lat:               info.lat,
                lon:               info.lon,
                population:        info.population,
                net_migration:     snapshot.map_or(0, |s| s.net_migration),
                infection_rate,
                employment_rate,
                policy_stringency,
                covid_force:       infection_rate / 100.0,
                economic_force:    employment_rate / 100.0,
                policy_force:      policy_stringency / 200.0,
            }
        })
        .collect();

    let edges = data
        .flows
        .iter()
        .filter(|f| categories.admits(f) && f.value > limits.network_min_flow)
        .take(limits.network_edge_limit)
        .map(|f| GravityEdge {
            source:      f.from.clone(),
            target:      f.to.clone(),
            value:       f.value,
            demographic: f.demographic.clone(),
        })
        .collect();

    GravityNetwork { nodes, edges }
}

/// Quarter parameter for the gravity network; defaults to the target quarter.
pub fn network_quarter(params: &QueryParams) -> &str {
    params.get("quarter").map(String::as_str).unwrap_or(TARGET_QUARTER)
}

// ── Causality ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Covid,
    Policy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurgeDirection {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalEvent {
    pub id:       &'static str,
    #[serde(rename = "type")]
    pub kind:     EventKind,
    pub label:    &'static str,
    pub quarter:  &'static str,
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationSurge {
    pub id:        &'static str,
    pub state:     &'static str,
    pub quarter:   &'static str,
    pub magnitude: Magnitude,
    pub direction: SurgeDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CausalLink {
    pub source:   &'static str,
    pub target:   &'static str,
    /// Quarters between cause and surge.
    pub lag:      u8,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CausalityNetwork {
    pub events:           Vec<CausalEvent>,
    pub migration_surges: Vec<MigrationSurge>,
    pub links:            Vec<CausalLink>,
}

const EVENTS: [(&str, EventKind, &str, &str, u8); 7] = [
    ("event1", EventKind::Covid, "First Wave Peak", "2020-Q2", 8),
    ("event2", EventKind::Covid, "Lockdown Orders", "2020-Q2", 9),
    ("event3", EventKind::Policy, "Mask Mandates", "2020-Q3", 6),
    ("event4", EventKind::Covid, "Delta Variant", "2021-Q3", 7),
    ("event5", EventKind::Policy, "Vaccine Mandates", "2021-Q4", 8),
    ("event6", EventKind::Covid, "Omicron Surge", "2022-Q1", 6),
    ("event7", EventKind::Policy, "Restrictions Lifted", "2022-Q2", 5),
];

const SURGES: [(&str, &str, &str, Magnitude, SurgeDirection); 7] = [
    ("surge1", "Texas", "2020-Q3", 45_000, SurgeDirection::Inflow),
    ("surge2", "Florida", "2020-Q4", 52_000, SurgeDirection::Inflow),
    ("surge3", "California", "2020-Q3", 38_000, SurgeDirection::Outflow),
    ("surge4", "New York", "2020-Q4", 41_000, SurgeDirection::Outflow),
    ("surge5", "Colorado", "2021-Q2", 28_000, SurgeDirection::Inflow),
    ("surge6", "Arizona", "2021-Q4", 32_000, SurgeDirection::Inflow),
    ("surge7", "Illinois", "2022-Q1", 25_000, SurgeDirection::Outflow),
];

const LINKS: [(&str, &str, u8, f64); 9] = [
    ("event1", "surge3", 1, 0.8),
    ("event2", "surge3", 1, 0.9),
    ("event2", "surge4", 2, 0.85),
    ("event1", "surge1", 1, 0.7),
    ("event3", "surge2", 1, 0.75),
    ("event4", "surge5", 3, 0.65),
    ("event5", "surge6", 0, 0.8),
    ("event6", "surge7", 0, 0.7),
    ("event7", "surge1", 4, 0.6),
];

/// The fixed event → surge graph. Independent of any filter.
pub fn causality_network() -> CausalityNetwork {
    CausalityNetwork {
        events: EVENTS
            .iter()
            .map(|&(id, kind, label, quarter, severity)| CausalEvent { id, kind, label, quarter, severity })
            .collect(),
        migration_surges: SURGES
            .iter()
            .map(|&(id, state, quarter, magnitude, direction)| MigrationSurge {
                id,
                state,
                quarter,
                magnitude,
                direction,
            })
            .collect(),
        links: LINKS
            .iter()
            .map(|&(source, target, lag, strength)| CausalLink { source, target, lag, strength })
            .collect(),
    }
}
