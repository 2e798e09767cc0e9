//! Artifact loading as done at start-up

mod common;

use common::fixture_path;
use prediction_server::model::{ArtifactError, Classifier, Scaler};
use prediction_server::ModelArtifacts;
use serde_json::Value;
use std::io::Write;

#[test]
fn test_fixture_bundle_loads() {
    let artifacts = ModelArtifacts::load(fixture_path()).unwrap();

    assert_eq!(artifacts.feature_count(), 30);
    assert_eq!(artifacts.scaler().n_features(), 30);
    assert_eq!(artifacts.classifier().n_features(), 30);
    assert_eq!(artifacts.metadata().test_auc, Some(0.9953));
}

#[test]
fn test_missing_bundle_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelArtifacts::load(dir.path().join("breast_cancer_model.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::NotFound(_)));
}

#[test]
fn test_truncated_metadata_fails() {
    // Drop one feature name: the bundle no longer agrees with itself
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    let mut bundle: Value = serde_json::from_str(&raw).unwrap();
    bundle["metadata"]["feature_names"].as_array_mut().unwrap().pop();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bundle.to_string().as_bytes()).unwrap();

    let err = ModelArtifacts::load(file.path()).unwrap_err();
    assert!(matches!(err, ArtifactError::Invalid(_)));
}

#[test]
fn test_bundle_without_model_field_fails() {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    let mut bundle: Value = serde_json::from_str(&raw).unwrap();
    bundle.as_object_mut().unwrap().remove("model");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bundle.to_string().as_bytes()).unwrap();

    assert!(matches!(ModelArtifacts::load(file.path()), Err(ArtifactError::Parse(_))));
}
