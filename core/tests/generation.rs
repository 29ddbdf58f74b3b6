//! Generator shape and invariants over a full run.

use migration_core::{
    catalog::{AGE_GROUPS, DEMOGRAPHICS, MAJOR_ROUTES, OCCUPATIONS, QUARTERS, STATES, TARGET_QUARTER},
    config::{DashboardConfig, GeneratorConfig},
    dataset::{MigrationDataset, FLOWS_ARTIFACT, STATE_DATA_ARTIFACT, TIME_SERIES_ARTIFACT},
    engine::GenerationEngine,
    flow_dataset::{Gender, MigrationFlow},
    manifest::GenerationManifest,
    store::{ArtifactEncoding, ArtifactStore},
};

fn engine(seed: u64) -> GenerationEngine {
    let mut config = DashboardConfig::default_test().generator;
    config.seed = seed;
    GenerationEngine::new(config)
}

#[test]
fn collection_sizes_follow_the_cartesian_expansion() {
    let data = engine(42).generate();
    let combos = DEMOGRAPHICS.len() * AGE_GROUPS.len() * OCCUPATIONS.len();

    assert_eq!(data.flows.len(), MAJOR_ROUTES.len() * combos * 3);
    assert_eq!(data.state_data.len(), STATES.len() * combos);
    assert_eq!(data.time_series.len(), combos);
    for collection_len in [data.infodemic.len(), data.policies.len(), data.resilience.len(), data.emotions.len()] {
        assert_eq!(collection_len, STATES.len() * QUARTERS.len());
    }
    assert_eq!(data.states.len(), 50);
}

#[test]
fn every_snapshot_balances() {
    let data = engine(7).generate();
    for (key, s) in &data.state_data {
        assert_eq!(
            s.net_migration,
            s.inflow as i64 - s.outflow as i64,
            "netMigration drifted for {key}"
        );
        assert_eq!(&s.key(), key);
        assert_eq!(s.quarter, TARGET_QUARTER);
    }
}

#[test]
fn every_policy_is_derived_from_its_stringency() {
    let data = engine(7).generate();
    for p in &data.policies {
        assert!(p.is_consistent(), "{} {} stringency={}", p.state, p.quarter, p.stringency);
    }
}

#[test]
fn flows_are_single_quarter_and_split_by_gender() {
    let data = engine(3).generate();
    assert!(data.flows.iter().all(|f| f.quarter == "all"));

    for triple in data.flows.chunks(3) {
        let [all, male, female] = triple else { panic!("flows not grouped in threes") };
        assert_eq!((all.gender, male.gender, female.gender), (Gender::All, Gender::Male, Gender::Female));
        assert_eq!((&all.from, &all.to), (&male.from, &male.to));
        assert_eq!(all.demographic, female.demographic);
        assert!((male.value as f64 - all.value as f64 * 0.52).abs() <= 1.0);
        assert!((female.value as f64 - all.value as f64 * 0.48).abs() <= 1.0);
    }
}

/// Flows exceed the JSON Lines threshold and must stream; every line
/// must parse back to the exact record that was generated.
#[test]
fn flows_round_trip_through_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::create(dir.path()).unwrap();
    let (data, manifest) = engine(11).generate_into(&store).unwrap();

    assert_eq!(store.encoding_of(FLOWS_ARTIFACT), Some(ArtifactEncoding::JsonLines));
    let entry = manifest.entry(FLOWS_ARTIFACT).expect("flows in manifest");
    assert_eq!(entry.encoding, ArtifactEncoding::JsonLines);
    assert_eq!(entry.items, data.flows.len());

    let reloaded: Vec<MigrationFlow> = store.load_sequence(FLOWS_ARTIFACT).unwrap();
    assert_eq!(reloaded.len(), data.flows.len());
    for (i, (written, read)) in data.flows.iter().zip(&reloaded).enumerate() {
        assert_eq!(written, read, "flow {i} changed on the way through disk");
    }
}

#[test]
fn small_collections_are_single_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::create(dir.path()).unwrap();
    engine(11).generate_into(&store).unwrap();

    assert_eq!(store.encoding_of(TIME_SERIES_ARTIFACT), Some(ArtifactEncoding::Json));
    // Keyed maps stay one document even above the threshold.
    assert_eq!(store.encoding_of(STATE_DATA_ARTIFACT), Some(ArtifactEncoding::Json));

    let manifest: GenerationManifest = store.load_document("manifest").unwrap();
    assert_eq!(manifest.seed, 11);
    assert_eq!(manifest.artifacts.len(), 8);
}

#[test]
fn lowering_the_threshold_switches_encodings_transparently() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::create(dir.path()).unwrap();
    let config = GeneratorConfig { seed: 5, jsonl_threshold: 100, progress_interval: 0 };
    let (generated, _) = GenerationEngine::new(config).generate_into(&store).unwrap();

    assert_eq!(store.encoding_of(TIME_SERIES_ARTIFACT), Some(ArtifactEncoding::JsonLines));
    assert_eq!(store.encoding_of("policies"), Some(ArtifactEncoding::JsonLines));

    let loaded = MigrationDataset::load(&store).unwrap();
    assert_eq!(loaded.counts(), generated.counts());
    assert_eq!(loaded.time_series, generated.time_series);
}

/// Every collection, floats included, must come back from disk exactly as
/// generated, whichever encoding each artifact ended up in.
#[test]
fn reloaded_dataset_equals_generated_dataset() {
    for jsonl_threshold in [10_000, 100] {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();
        let config = GeneratorConfig { seed: 5, jsonl_threshold, progress_interval: 0 };
        let (generated, _) = GenerationEngine::new(config).generate_into(&store).unwrap();

        let loaded = MigrationDataset::load(&store).unwrap();
        assert_eq!(loaded.policies, generated.policies, "policies drifted (threshold {jsonl_threshold})");
        assert_eq!(loaded.resilience, generated.resilience, "resilience drifted (threshold {jsonl_threshold})");
        assert_eq!(loaded.emotions, generated.emotions, "emotions drifted (threshold {jsonl_threshold})");
        assert_eq!(loaded.infodemic, generated.infodemic, "infodemic drifted (threshold {jsonl_threshold})");
        assert!(loaded.state_data == generated.state_data, "snapshots drifted (threshold {jsonl_threshold})");
        assert!(loaded == generated, "dataset drifted (threshold {jsonl_threshold})");
    }
}

#[test]
fn unwritable_directory_fails_generation() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    // A regular file where the data directory should be.
    assert!(ArtifactStore::create(&blocker).is_err());

    let store = ArtifactStore::new(blocker.join("data"));
    let err = engine(1).generate_into(&store).unwrap_err();
    assert!(err.to_string().contains("not-a-dir"), "error should name the path: {err}");
}
