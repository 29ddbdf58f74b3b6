//! Fixed enumerations shared by the generator and the query service.
//!
//! RULE: Category spellings and wildcard sentinels live here and nowhere
//! else. The generator writes these exact strings and the query layer
//! compares against them, so the two sides can never drift apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Wildcard sentinels ─────────────────────────────────────────────

pub const ALL_DEMOGRAPHICS: &str = "All Demographics";
pub const ALL_AGES: &str = "All Ages";
pub const ALL_OCCUPATIONS: &str = "All Occupations";
/// Wildcard for gender, state and quarter filters. Also the quarter tag
/// carried by every migration flow.
pub const ALL: &str = "all";

// ── Categories ─────────────────────────────────────────────────────

pub const DEMOGRAPHICS: [&str; 6] = [
    ALL_DEMOGRAPHICS,
    "Asian American",
    "Hispanic/Latino",
    "African American",
    "White",
    "Native American",
];

pub const AGE_GROUPS: [&str; 7] = [
    ALL_AGES, "18-24", "25-34", "35-44", "45-54", "55-64", "65+",
];

pub const OCCUPATIONS: [&str; 7] = [
    ALL_OCCUPATIONS,
    "Remote-work eligible",
    "Healthcare workers",
    "Construction workers",
    "Service industry",
    "Tech workers",
    "Education",
];

/// Canonical quarter order. Time series points follow it exactly.
pub const QUARTERS: [&str; 20] = [
    "2019-Q1", "2019-Q2", "2019-Q3", "2019-Q4",
    "2020-Q1", "2020-Q2", "2020-Q3", "2020-Q4",
    "2021-Q1", "2021-Q2", "2021-Q3", "2021-Q4",
    "2022-Q1", "2022-Q2", "2022-Q3", "2022-Q4",
    "2023-Q1", "2023-Q2", "2023-Q3", "2023-Q4",
];

/// The only quarter that carries state snapshots.
pub const TARGET_QUARTER: &str = QUARTERS[QUARTERS.len() - 1];

/// Quarters that switch resilience sampling to its pandemic ranges.
pub const PANDEMIC_PEAK_QUARTERS: [&str; 3] = ["2020-Q2", "2020-Q3", "2021-Q1"];

pub fn is_pandemic_peak(quarter: &str) -> bool {
    PANDEMIC_PEAK_QUARTERS.iter().any(|peak| quarter.contains(peak))
}

/// Wider window used by the emotion dataset: every 2020 quarter plus 2021-Q1.
pub fn is_emotional_peak(quarter: &str) -> bool {
    quarter.contains("2020") || quarter.contains("2021-Q1")
}

// ── States ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateEntry {
    pub name:       &'static str,
    pub abbr:       &'static str,
    pub lat:        f64,
    pub lon:        f64,
    pub population: u64,
}

/// Metadata row as published in `states.json`, keyed by full state name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    pub abbr:       String,
    pub lat:        f64,
    pub lon:        f64,
    pub population: u64,
}

pub type StateTable = BTreeMap<String, StateInfo>;

pub const STATES: [StateEntry; 50] = [
    StateEntry { name: "Alabama", abbr: "AL", lat: 32.806671, lon: -86.791130, population: 5_024_279 },
    StateEntry { name: "Alaska", abbr: "AK", lat: 61.370716, lon: -152.404419, population: 733_391 },
    StateEntry { name: "Arizona", abbr: "AZ", lat: 33.729759, lon: -111.431221, population: 7_151_502 },
    StateEntry { name: "Arkansas", abbr: "AR", lat: 34.969704, lon: -92.373123, population: 3_011_524 },
    StateEntry { name: "California", abbr: "CA", lat: 36.116203, lon: -119.681564, population: 39_538_223 },
    StateEntry { name: "Colorado", abbr: "CO", lat: 39.059811, lon: -105.311104, population: 5_773_714 },
    StateEntry { name: "Connecticut", abbr: "CT", lat: 41.597782, lon: -72.755371, population: 3_605_944 },
    StateEntry { name: "Delaware", abbr: "DE", lat: 39.318523, lon: -75.507141, population: 989_948 },
    StateEntry { name: "Florida", abbr: "FL", lat: 27.766279, lon: -81.686783, population: 21_538_187 },
    StateEntry { name: "Georgia", abbr: "GA", lat: 33.040619, lon: -83.643074, population: 10_711_908 },
    StateEntry { name: "Hawaii", abbr: "HI", lat: 21.094318, lon: -157.498337, population: 1_455_271 },
    StateEntry { name: "Idaho", abbr: "ID", lat: 44.240459, lon: -114.478828, population: 1_839_106 },
    StateEntry { name: "Illinois", abbr: "IL", lat: 40.349457, lon: -88.986137, population: 12_812_508 },
    StateEntry { name: "Indiana", abbr: "IN", lat: 39.849426, lon: -86.258278, population: 6_785_528 },
    StateEntry { name: "Iowa", abbr: "IA", lat: 42.011539, lon: -93.210526, population: 3_190_369 },
    StateEntry { name: "Kansas", abbr: "KS", lat: 38.526600, lon: -96.726486, population: 2_937_880 },
    StateEntry { name: "Kentucky", abbr: "KY", lat: 37.668140, lon: -84.670067, population: 4_505_836 },
    StateEntry { name: "Louisiana", abbr: "LA", lat: 31.169546, lon: -91.867805, population: 4_657_757 },
    StateEntry { name: "Maine", abbr: "ME", lat: 44.693947, lon: -69.381927, population: 1_362_359 },
    StateEntry { name: "Maryland", abbr: "MD", lat: 39.063946, lon: -76.802101, population: 6_177_224 },
    StateEntry { name: "Massachusetts", abbr: "MA", lat: 42.230171, lon: -71.530106, population: 7_029_917 },
    StateEntry { name: "Michigan", abbr: "MI", lat: 43.326618, lon: -84.536095, population: 10_077_331 },
    StateEntry { name: "Minnesota", abbr: "MN", lat: 45.694454, lon: -93.900192, population: 5_706_494 },
    StateEntry { name: "Mississippi", abbr: "MS", lat: 32.741646, lon: -89.678696, population: 2_961_279 },
    StateEntry { name: "Missouri", abbr: "MO", lat: 38.456085, lon: -92.288368, population: 6_154_913 },
    StateEntry { name: "Montana", abbr: "MT", lat: 46.921925, lon: -110.454353, population: 1_084_225 },
    StateEntry { name: "Nebraska", abbr: "NE", lat: 41.125370, lon: -98.268082, population: 1_961_504 },
    StateEntry { name: "Nevada", abbr: "NV", lat: 38.313515, lon: -117.055374, population: 3_104_614 },
    StateEntry { name: "New Hampshire", abbr: "NH", lat: 43.452492, lon: -71.563896, population: 1_377_529 },
    StateEntry { name: "New Jersey", abbr: "NJ", lat: 40.298904, lon: -74.521011, population: 9_288_994 },
    StateEntry { name: "New Mexico", abbr: "NM", lat: 34.840515, lon: -106.248482, population: 2_117_522 },
    StateEntry { name: "New York", abbr: "NY", lat: 42.165726, lon: -74.948051, population: 20_201_249 },
    StateEntry { name: "North Carolina", abbr: "NC", lat: 35.630066, lon: -79.806419, population: 10_439_388 },
    StateEntry { name: "North Dakota", abbr: "ND", lat: 47.528912, lon: -99.784012, population: 779_094 },
    StateEntry { name: "Ohio", abbr: "OH", lat: 40.388783, lon: -82.764915, population: 11_799_448 },
    StateEntry { name: "Oklahoma", abbr: "OK", lat: 35.565342, lon: -96.928917, population: 3_959_353 },
    StateEntry { name: "Oregon", abbr: "OR", lat: 44.572021, lon: -122.070938, population: 4_237_256 },
    StateEntry { name: "Pennsylvania", abbr: "PA", lat: 40.590752, lon: -77.209755, population: 13_002_700 },
    StateEntry { name: "Rhode Island", abbr: "RI", lat: 41.680893, lon: -71.511780, population: 1_097_379 },
    StateEntry { name: "South Carolina", abbr: "SC", lat: 33.856892, lon: -80.945007, population: 5_118_425 },
    StateEntry { name: "South Dakota", abbr: "SD", lat: 44.299782, lon: -99.438828, population: 886_667 },
    StateEntry { name: "Tennessee", abbr: "TN", lat: 35.747845, lon: -86.692345, population: 6_910_840 },
    StateEntry { name: "Texas", abbr: "TX", lat: 31.054487, lon: -97.563461, population: 29_145_505 },
    StateEntry { name: "Utah", abbr: "UT", lat: 40.150032, lon: -111.862434, population: 3_271_616 },
    StateEntry { name: "Vermont", abbr: "VT", lat: 44.045876, lon: -72.710686, population: 643_077 },
    StateEntry { name: "Virginia", abbr: "VA", lat: 37.769337, lon: -78.169968, population: 8_631_393 },
    StateEntry { name: "Washington", abbr: "WA", lat: 47.400902, lon: -121.490494, population: 7_705_281 },
    StateEntry { name: "West Virginia", abbr: "WV", lat: 38.491226, lon: -80.954453, population: 1_793_716 },
    StateEntry { name: "Wisconsin", abbr: "WI", lat: 44.268543, lon: -89.616508, population: 5_893_718 },
    StateEntry { name: "Wyoming", abbr: "WY", lat: 42.755966, lon: -107.302490, population: 576_851 },
];

pub fn state(name: &str) -> Option<&'static StateEntry> {
    STATES.iter().find(|s| s.name == name)
}

pub fn state_table() -> StateTable {
    STATES
        .iter()
        .map(|s| {
            (
                s.name.to_string(),
                StateInfo {
                    abbr:       s.abbr.to_string(),
                    lat:        s.lat,
                    lon:        s.lon,
                    population: s.population,
                },
            )
        })
        .collect()
}

// ── Routes ─────────────────────────────────────────────────────────

/// Directed (origin, destination) pairs that get flow data.
pub const MAJOR_ROUTES: [(&str, &str); 47] = [
    ("California", "Texas"), ("California", "Washington"), ("California", "Oregon"), ("California", "Nevada"),
    ("New York", "Florida"), ("New York", "Texas"), ("New York", "California"), ("New York", "North Carolina"),
    ("Illinois", "Texas"), ("Illinois", "Florida"), ("Illinois", "Arizona"), ("Illinois", "California"),
    ("Texas", "California"), ("Texas", "Florida"), ("Texas", "Colorado"), ("Texas", "Arizona"),
    ("Florida", "Georgia"), ("Florida", "North Carolina"), ("Florida", "Texas"), ("Florida", "Tennessee"),
    ("Massachusetts", "California"), ("Massachusetts", "Florida"), ("Massachusetts", "New Hampshire"),
    ("Pennsylvania", "Florida"), ("Pennsylvania", "North Carolina"), ("Pennsylvania", "Texas"),
    ("Washington", "Oregon"), ("Washington", "Texas"), ("Washington", "California"),
    ("Georgia", "Florida"), ("Georgia", "Texas"), ("Georgia", "North Carolina"),
    ("Ohio", "Florida"), ("Ohio", "Texas"), ("Ohio", "North Carolina"),
    ("Michigan", "Florida"), ("Michigan", "Texas"), ("Michigan", "Arizona"),
    ("Virginia", "North Carolina"), ("Virginia", "Florida"), ("Virginia", "Texas"),
    ("Arizona", "California"), ("Arizona", "Texas"), ("Arizona", "Colorado"),
    ("Colorado", "California"), ("Colorado", "Texas"), ("Colorado", "Florida"),
];
