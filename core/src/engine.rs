//! The generation engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Migration flows
//!   2. State snapshots
//!   3. Time series
//!   4. Infodemic
//!   5. Policy
//!   6. Resilience
//!   7. Emotion
//!
//! RULES:
//!   - Each generator runs exactly once and draws only from its own slot.
//!   - Generators never see each other's output.
//!   - Nothing is written until every collection has been generated.
//!   - Any write failure aborts the run; nothing is retried.

use crate::{
    catalog,
    config::GeneratorConfig,
    dataset::{
        MigrationDataset, EMOTIONS_ARTIFACT, FLOWS_ARTIFACT, INFODEMIC_ARTIFACT,
        MANIFEST_ARTIFACT, POLICIES_ARTIFACT, RESILIENCE_ARTIFACT, STATES_ARTIFACT,
        STATE_DATA_ARTIFACT, TIME_SERIES_ARTIFACT,
    },
    emotion_dataset::EmotionGenerator,
    error::DataResult,
    flow_dataset::FlowGenerator,
    generator::DatasetGenerator,
    infodemic_dataset::InfodemicGenerator,
    manifest::GenerationManifest,
    policy_dataset::PolicyGenerator,
    resilience_dataset::ResilienceGenerator,
    rng::RngBank,
    snapshot_dataset::SnapshotGenerator,
    store::{ArtifactEncoding, ArtifactStore},
    time_series_dataset::TimeSeriesGenerator,
};
use serde::Serialize;

pub struct GenerationEngine {
    config:   GeneratorConfig,
    rng_bank: RngBank,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            rng_bank: RngBank::new(config.seed),
            config,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    /// Generate every collection in the documented order.
    pub fn generate(&self) -> MigrationDataset {
        let interval = self.config.progress_interval;

        let flows = self.run(&FlowGenerator::new(interval));
        let state_data = self
            .run(&SnapshotGenerator::new(interval))
            .into_iter()
            .map(|s| (s.key(), s))
            .collect();
        let time_series = self.run(&TimeSeriesGenerator::new(interval));
        let infodemic = self.run(&InfodemicGenerator);
        let policies = self.run(&PolicyGenerator);
        let resilience = self.run(&ResilienceGenerator);
        let emotions = self.run(&EmotionGenerator);

        MigrationDataset {
            flows,
            state_data,
            time_series,
            infodemic,
            policies,
            resilience,
            emotions,
            states: catalog::state_table(),
        }
    }

    fn run<G: DatasetGenerator>(&self, generator: &G) -> G::Output {
        let mut rng = self.rng_bank.for_dataset(generator.slot());
        log::info!("generating {} (rng stream '{}')", generator.name(), rng.name);
        generator.generate(&mut rng)
    }

    /// Write every collection, then the manifest.
    pub fn write(&self, data: &MigrationDataset, store: &ArtifactStore) -> DataResult<GenerationManifest> {
        log::info!("writing data files to {}", store.dir().display());
        let mut manifest = GenerationManifest::new(self.seed());

        self.write_sequence(store, &mut manifest, FLOWS_ARTIFACT, &data.flows)?;

        // Keyed maps are always a single document.
        store.write_document(STATE_DATA_ARTIFACT, &data.state_data)?;
        manifest.record(STATE_DATA_ARTIFACT, data.state_data.len(), ArtifactEncoding::Json);
        log::info!("  wrote {STATE_DATA_ARTIFACT}.json ({} records)", data.state_data.len());

        self.write_sequence(store, &mut manifest, TIME_SERIES_ARTIFACT, &data.time_series)?;
        self.write_sequence(store, &mut manifest, INFODEMIC_ARTIFACT, &data.infodemic)?;
        self.write_sequence(store, &mut manifest, POLICIES_ARTIFACT, &data.policies)?;
        self.write_sequence(store, &mut manifest, RESILIENCE_ARTIFACT, &data.resilience)?;
        self.write_sequence(store, &mut manifest, EMOTIONS_ARTIFACT, &data.emotions)?;

        store.write_document(STATES_ARTIFACT, &data.states)?;
        manifest.record(STATES_ARTIFACT, data.states.len(), ArtifactEncoding::Json);

        store.write_document(MANIFEST_ARTIFACT, &manifest)?;
        log::info!("generation {} complete", manifest.generation_id);
        Ok(manifest)
    }

    fn write_sequence<T: Serialize>(
        &self,
        store: &ArtifactStore,
        manifest: &mut GenerationManifest,
        name: &str,
        items: &[T],
    ) -> DataResult<()> {
        let encoding = store.write_sequence(name, items, self.config.jsonl_threshold)?;
        manifest.record(name, items.len(), encoding);
        log::info!("  wrote {name}.{} ({} records)", encoding.extension(), items.len());
        Ok(())
    }

    /// Generate and write in one step.
    pub fn generate_into(&self, store: &ArtifactStore) -> DataResult<(MigrationDataset, GenerationManifest)> {
        let data = self.generate();
        let manifest = self.write(&data, store)?;
        Ok((data, manifest))
    }
}
