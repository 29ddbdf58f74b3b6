//! Loading from disk and answering request lines end to end.

use migration_core::{
    config::DashboardConfig,
    dataset::{MigrationDataset, POLICIES_ARTIFACT},
    engine::GenerationEngine,
    error::DataError,
    service::QueryService,
    store::{ArtifactEncoding, ArtifactStore},
};
use serde_json::Value;
use std::fs;

fn generated_store() -> (tempfile::TempDir, ArtifactStore) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::create(dir.path()).unwrap();
    GenerationEngine::new(DashboardConfig::default_test().generator)
        .generate_into(&store)
        .unwrap();
    (dir, store)
}

fn service() -> (tempfile::TempDir, QueryService) {
    let (dir, store) = generated_store();
    let data = MigrationDataset::load(&store).unwrap();
    (dir, QueryService::new(data, DashboardConfig::default_test().limits))
}

#[test]
fn loading_an_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = MigrationDataset::load(&ArtifactStore::new(dir.path())).unwrap_err();
    assert!(matches!(err, DataError::MissingArtifact { .. }), "unexpected error: {err}");
}

#[test]
fn one_missing_artifact_fails_the_whole_load() {
    let (_dir, store) = generated_store();
    fs::remove_file(store.path_for(POLICIES_ARTIFACT, ArtifactEncoding::Json)).unwrap();

    match MigrationDataset::load(&store) {
        Err(DataError::MissingArtifact { name, .. }) => assert_eq!(name, POLICIES_ARTIFACT),
        other => panic!("expected MissingArtifact, got {other:?}"),
    }
}

#[test]
fn a_corrupt_line_reports_its_position() {
    let (_dir, store) = generated_store();
    let path = store.path_for("migrationFlows", ArtifactEncoding::JsonLines);
    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("{\"from\": \n");
    fs::write(&path, text).unwrap();

    match MigrationDataset::load(&store) {
        Err(DataError::MalformedRecord { line, .. }) => assert_eq!(line, 41_455),
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn health_and_catalog_requests() {
    let (_dir, service) = service();

    let health = service.handle_line(r#"{"op": "health"}"#);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["dataLoaded"]["migrationFlows"], 41_454);
    assert_eq!(health["dataLoaded"]["stateData"], 14_700);

    let quarters = service.handle_line(r#"{"op": "quarters"}"#);
    assert_eq!(quarters.as_array().map(Vec::len), Some(20));

    let states = service.handle_line(r#"{"op": "states"}"#);
    assert_eq!(states["Ohio"]["abbr"], "OH");
}

#[test]
fn flow_requests_accept_numeric_params() {
    let (_dir, service) = service();

    let reply = service.handle_line(
        r#"{"op": "migration_flows", "params": {"gender": "male", "minFlow": 2000}}"#,
    );
    let flows = reply.as_array().expect("array reply");
    assert!(!flows.is_empty() && flows.len() <= 100);
    for f in flows {
        assert_eq!(f["gender"], "male");
        assert!(f["value"].as_u64().unwrap() >= 2000);
        assert_eq!(f["quarter"], "all");
    }
}

#[test]
fn summary_and_series_requests() {
    let (_dir, service) = service();

    let summary = service.handle_line(r#"{"op": "state_summary"}"#);
    assert_eq!(summary.as_object().map(|m| m.len()), Some(50));

    let none = service.handle_line(r#"{"op": "state_summary", "params": {"occupation": "Astronaut"}}"#);
    assert_eq!(none, Value::Object(Default::default()));

    let series = service.handle_line(r#"{"op": "time_series", "params": {"ageGroup": "65+"}}"#);
    assert_eq!(series["ageGroup"], "65+");
    assert_eq!(series["data"].as_array().map(Vec::len), Some(20));
}

#[test]
fn network_requests() {
    let (_dir, service) = service();

    let gravity = service.handle_line(r#"{"op": "gravity_network"}"#);
    assert_eq!(gravity["nodes"].as_array().map(Vec::len), Some(50));

    let causality = service.handle_line(r#"{"op": "causality_network"}"#);
    assert!(causality["events"].as_array().is_some_and(|e| !e.is_empty()));
    assert!(causality["migrationSurges"].as_array().is_some());
}

#[test]
fn unknown_ops_are_errors_not_failures() {
    let (_dir, service) = service();
    let reply = service.handle_line(r#"{"op": "drop_tables"}"#);
    assert!(reply["error"].is_string());

    // The service keeps answering afterwards.
    let reply = service.handle_line(r#"{"op": "policies", "params": {"state": "Maine"}}"#);
    assert_eq!(reply.as_array().map(Vec::len), Some(20));
}
