//! Emotion: public mood scores per state and quarter.
//!
//! Uses the wider emotional peak window (every 2020 quarter and 2021-Q1).
//! Fatigue has its own rule: any 2021 quarter is high regardless of peak.

use crate::{
    catalog::{is_emotional_peak, QUARTERS, STATES},
    generator::DatasetGenerator,
    rng::{DatasetRng, DatasetSlot},
    types::{Quarter, StateName},
};
use serde::{Deserialize, Serialize};

pub const PEAK_DOMINANT: [&str; 3] = ["fear", "anxiety", "anger"];
pub const CALM_DOMINANT: [&str; 2] = ["hope", "fatigue"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionRecord {
    pub state:            StateName,
    pub quarter:          Quarter,
    pub fear:             f64,
    pub anger:            f64,
    pub sadness:          f64,
    pub hope:             f64,
    pub anxiety:          f64,
    pub fatigue:          f64,
    pub dominant_emotion: String,
}

pub fn fatigue_range(quarter: &str) -> (f64, f64) {
    if quarter.contains("2021") {
        (70.0, 95.0)
    } else if is_emotional_peak(quarter) {
        (50.0, 70.0)
    } else {
        (30.0, 50.0)
    }
}

pub struct EmotionGenerator;

impl EmotionGenerator {
    fn sample(rng: &mut DatasetRng, state: &str, quarter: &str) -> EmotionRecord {
        let peak = is_emotional_peak(quarter);
        let mut band = |peak_range: (f64, f64), calm_range: (f64, f64)| {
            let (lo, hi) = if peak { peak_range } else { calm_range };
            rng.float_between(lo, hi)
        };
        let fear = band((60.0, 95.0), (20.0, 45.0));
        let anger = band((50.0, 85.0), (25.0, 50.0));
        let sadness = band((55.0, 80.0), (30.0, 50.0));
        let hope = band((30.0, 55.0), (60.0, 85.0));
        let anxiety = band((65.0, 90.0), (35.0, 60.0));

        let (lo, hi) = fatigue_range(quarter);
        let fatigue = rng.float_between(lo, hi);
        let dominant = if peak { rng.pick(&PEAK_DOMINANT) } else { rng.pick(&CALM_DOMINANT) };

        EmotionRecord {
            state:            state.to_string(),
            quarter:          quarter.to_string(),
            fear,
            anger,
            sadness,
            hope,
            anxiety,
            fatigue,
            dominant_emotion: dominant.to_string(),
        }
    }
}

impl DatasetGenerator for EmotionGenerator {
    type Output = Vec<EmotionRecord>;

    fn name(&self) -> &'static str { "emotion" }

    fn slot(&self) -> DatasetSlot { DatasetSlot::Emotion }

    fn generate(&self, rng: &mut DatasetRng) -> Vec<EmotionRecord> {
        STATES
            .iter()
            .flat_map(|state| QUARTERS.iter().map(move |quarter| (state.name, *quarter)))
            .map(|(state, quarter)| Self::sample(rng, state, quarter))
            .collect()
    }
}
