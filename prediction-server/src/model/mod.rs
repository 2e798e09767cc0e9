//! Model Module - artifact bundle and inference primitives
//!
//! The bundle is produced offline by the training job. This module only
//! knows how to load it, check that its pieces agree on the feature count,
//! and evaluate it.

pub mod artifacts;
pub mod forest;
pub mod handle;
pub mod metadata;
pub mod scaler;

use thiserror::Error;

// Re-export common types
pub use artifacts::{ArtifactError, ArtifactSource, ModelArtifacts};
pub use forest::{DecisionTree, Node, RandomForest};
pub use handle::ModelHandle;
pub use metadata::{FeatureImportance, ModelMetadata};
pub use scaler::StandardScaler;

/// Errors raised while evaluating a loaded model
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },

    #[error("corrupt model: {0}")]
    Corrupt(String),
}

/// Normalizes raw features with statistics fixed at training time
pub trait Scaler: Send + Sync {
    fn n_features(&self) -> usize;
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Binary classifier over a scaled feature row.
///
/// Probabilities are ordered by class label: `[p(0), p(1)]`.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError>;

    fn predict(&self, row: &[f64]) -> Result<u8, ModelError> {
        self.predict_proba(row).map(|p| argmax(&p))
    }
}

/// Index of the most probable class; ties go to class 0
pub fn argmax(probabilities: &[f64; 2]) -> u8 {
    if probabilities[1] > probabilities[0] {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_prefers_lower_class_on_tie() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
        assert_eq!(argmax(&[0.9, 0.1]), 0);
    }
}
