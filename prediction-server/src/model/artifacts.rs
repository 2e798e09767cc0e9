//! Artifact bundle loading
//!
//! The bundle is a single JSON file with three fields: `model` (random
//! forest), `scaler` (standard scaler) and `metadata`. It is read once at
//! start-up; a bundle whose parts disagree on the feature count is rejected.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::{Classifier, ModelMetadata, RandomForest, Scaler, StandardScaler};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model bundle: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model bundle: {0}")]
    Invalid(String),

    #[error("model already loaded")]
    AlreadyLoaded,
}

/// On-disk layout of the bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub model: RandomForest,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
}

/// Where a loaded bundle came from
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSource {
    pub path: String,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Fitted scaler, fitted classifier and their metadata.
///
/// Immutable once built. All three agree on `feature_count()`.
pub struct ModelArtifacts {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
    source: Option<ArtifactSource>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("features", &self.feature_count())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ModelArtifacts {
    pub fn new(
        scaler: Box<dyn Scaler>,
        classifier: Box<dyn Classifier>,
        metadata: ModelMetadata,
    ) -> Result<Self, ArtifactError> {
        let expected = metadata.features_count();

        if expected == 0 {
            return Err(ArtifactError::Invalid("metadata lists no feature names".to_string()));
        }
        if scaler.n_features() != expected {
            return Err(ArtifactError::Invalid(format!(
                "scaler expects {} features, metadata lists {}",
                scaler.n_features(),
                expected
            )));
        }
        if classifier.n_features() != expected {
            return Err(ArtifactError::Invalid(format!(
                "classifier expects {} features, metadata lists {}",
                classifier.n_features(),
                expected
            )));
        }

        Ok(Self {
            scaler,
            classifier,
            metadata,
            source: None,
        })
    }

    /// Validate a deserialized bundle and assemble it
    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self, ArtifactError> {
        bundle.model.validate().map_err(ArtifactError::Invalid)?;
        bundle.scaler.validate().map_err(ArtifactError::Invalid)?;

        Self::new(Box::new(bundle.scaler), Box::new(bundle.model), bundle.metadata)
    }

    /// Load the bundle from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading model artifacts");

        if !path.exists() {
            return Err(ArtifactError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle: ArtifactBundle = serde_json::from_slice(&bytes)?;

        let sha256 = hex::encode(Sha256::digest(&bytes));

        let mut artifacts = Self::from_bundle(bundle)?;
        tracing::info!(
            features = artifacts.feature_count(),
            sha256 = %sha256,
            "Model loaded successfully"
        );

        artifacts.source = Some(ArtifactSource {
            path: path.display().to_string(),
            sha256,
            loaded_at: Utc::now(),
        });

        Ok(artifacts)
    }

    pub fn feature_count(&self) -> usize {
        self.metadata.features_count()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn source(&self) -> Option<&ArtifactSource> {
        self.source.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DecisionTree, Node};
    use std::io::Write;

    fn bundle(n_features: usize) -> ArtifactBundle {
        ArtifactBundle {
            model: RandomForest::new(
                n_features,
                vec![DecisionTree::new(vec![
                    Node::Split { feature: 0, threshold: 0.0, left: 1, right: 2 },
                    Node::Leaf { value: vec![1.0, 0.0] },
                    Node::Leaf { value: vec![0.0, 1.0] },
                ])],
            ),
            scaler: StandardScaler::new(vec![0.0; n_features], vec![1.0; n_features]),
            metadata: ModelMetadata::new((0..n_features).map(|i| format!("f{}", i)).collect()),
        }
    }

    #[test]
    fn test_load_round_trips_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&bundle(3)).unwrap().as_bytes()).unwrap();

        let artifacts = ModelArtifacts::load(file.path()).unwrap();
        assert_eq!(artifacts.feature_count(), 3);

        let source = artifacts.source().unwrap();
        assert_eq!(source.sha256.len(), 64);
        assert_eq!(source.path, file.path().display().to_string());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelArtifacts::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_load_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x80\x04\x95 not json").unwrap();

        let err = ModelArtifacts::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse(_)));
    }

    #[test]
    fn test_feature_count_mismatch_is_rejected() {
        let mut b = bundle(3);
        b.metadata.feature_names.pop();
        let err = ModelArtifacts::from_bundle(b).unwrap_err();
        assert!(err.to_string().contains("metadata lists 2"));

        let mut b = bundle(3);
        b.scaler = StandardScaler::new(vec![0.0; 4], vec![1.0; 4]);
        assert!(ModelArtifacts::from_bundle(b).is_err());
    }

    #[test]
    fn test_empty_feature_list_is_rejected() {
        let b = ArtifactBundle {
            metadata: ModelMetadata::new(vec![]),
            ..bundle(1)
        };
        assert!(matches!(ModelArtifacts::from_bundle(b), Err(ArtifactError::Invalid(_))));
    }
}
