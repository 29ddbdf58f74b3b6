//! The seven generated collections plus the state table, held in memory.
//!
//! Built once (by the engine, or by loading artifacts at startup) and
//! never mutated afterwards. The query layer only ever borrows it.

use crate::{
    catalog::StateTable,
    emotion_dataset::EmotionRecord,
    error::DataResult,
    flow_dataset::MigrationFlow,
    infodemic_dataset::InfodemicRecord,
    policy_dataset::PolicyRecord,
    resilience_dataset::ResilienceRecord,
    snapshot_dataset::StateSnapshot,
    store::ArtifactStore,
    time_series_dataset::TimeSeries,
};
use serde::Serialize;
use std::collections::BTreeMap;

// Artifact names on disk, without extension.
pub const FLOWS_ARTIFACT: &str = "migrationFlows";
pub const STATE_DATA_ARTIFACT: &str = "stateData";
pub const TIME_SERIES_ARTIFACT: &str = "timeSeries";
pub const INFODEMIC_ARTIFACT: &str = "infodemic";
pub const POLICIES_ARTIFACT: &str = "policies";
pub const RESILIENCE_ARTIFACT: &str = "resilience";
pub const EMOTIONS_ARTIFACT: &str = "emotions";
pub const STATES_ARTIFACT: &str = "states";
pub const MANIFEST_ARTIFACT: &str = "manifest";

/// Snapshots keyed by `snapshot_key(state, quarter, demographic, age, occupation)`.
pub type SnapshotIndex = BTreeMap<String, StateSnapshot>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationDataset {
    pub flows:       Vec<MigrationFlow>,
    pub state_data:  SnapshotIndex,
    pub time_series: Vec<TimeSeries>,
    pub infodemic:   Vec<InfodemicRecord>,
    pub policies:    Vec<PolicyRecord>,
    pub resilience:  Vec<ResilienceRecord>,
    pub emotions:    Vec<EmotionRecord>,
    pub states:      StateTable,
}

/// Item counts per collection, as reported by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCounts {
    pub migration_flows: usize,
    pub state_data:      usize,
    pub time_series:     usize,
    pub infodemic:       usize,
    pub policies:        usize,
    pub resilience:      usize,
    pub emotions:        usize,
    pub states:          usize,
}

impl MigrationDataset {
    /// Load every artifact from `store`.
    ///
    /// Any missing or malformed artifact fails the whole load; callers must
    /// not serve a partially loaded dataset.
    pub fn load(store: &ArtifactStore) -> DataResult<Self> {
        log::info!("loading data files from {}", store.dir().display());

        let flows: Vec<MigrationFlow> = store.load_sequence(FLOWS_ARTIFACT)?;
        log::info!("  loaded {} migration flows", flows.len());

        let state_data: SnapshotIndex = store.load_document(STATE_DATA_ARTIFACT)?;
        log::info!("  loaded {} state records", state_data.len());

        let time_series: Vec<TimeSeries> = store.load_sequence(TIME_SERIES_ARTIFACT)?;
        log::info!("  loaded {} time series", time_series.len());

        let infodemic: Vec<InfodemicRecord> = store.load_sequence(INFODEMIC_ARTIFACT)?;
        log::info!("  loaded {} infodemic records", infodemic.len());

        let policies: Vec<PolicyRecord> = store.load_sequence(POLICIES_ARTIFACT)?;
        log::info!("  loaded {} policy records", policies.len());

        let resilience: Vec<ResilienceRecord> = store.load_sequence(RESILIENCE_ARTIFACT)?;
        log::info!("  loaded {} resilience records", resilience.len());

        let emotions: Vec<EmotionRecord> = store.load_sequence(EMOTIONS_ARTIFACT)?;
        log::info!("  loaded {} emotion records", emotions.len());

        let states: StateTable = store.load_document(STATES_ARTIFACT)?;
        log::info!("  loaded {} states", states.len());

        Ok(Self {
            flows,
            state_data,
            time_series,
            infodemic,
            policies,
            resilience,
            emotions,
            states,
        })
    }

    pub fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            migration_flows: self.flows.len(),
            state_data:      self.state_data.len(),
            time_series:     self.time_series.len(),
            infodemic:       self.infodemic.len(),
            policies:        self.policies.len(),
            resilience:      self.resilience.len(),
            emotions:        self.emotions.len(),
            states:          self.states.len(),
        }
    }
}
