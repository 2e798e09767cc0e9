//! Prediction service - scaler, classifier, response shaping

use std::sync::Arc;

use serde::Serialize;

use crate::model::{argmax, ModelArtifacts, ModelError};
use crate::validation::FeatureRow;

/// Diagnosis for a class label as encoded by the training dataset:
/// label 0 is malignant, label 1 is benign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Diagnosis {
    Malignant,
    Benign,
}

impl Diagnosis {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Diagnosis::Benign
        } else {
            Diagnosis::Malignant
        }
    }
}

impl std::fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnosis::Malignant => write!(f, "Malignant"),
            Diagnosis::Benign => write!(f, "Benign"),
        }
    }
}

/// Class probabilities as percentages, each rounded on its own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub malignant: f64,
    pub benign: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class: u8,
    pub diagnosis: Diagnosis,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

impl PredictionResult {
    /// Shape a label and `[p(malignant), p(benign)]` into the response form
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        let class = argmax(&probabilities);
        let confidence = probabilities[0].max(probabilities[1]) * 100.0;

        Self {
            class,
            diagnosis: Diagnosis::from_label(class),
            confidence: round2(confidence),
            probabilities: ClassProbabilities {
                malignant: round2(probabilities[0] * 100.0),
                benign: round2(probabilities[1] * 100.0),
            },
        }
    }
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub struct PredictionService {
    artifacts: Arc<ModelArtifacts>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }

    /// Run one validated row through the model.
    ///
    /// The classifier is called once; the label is the argmax of the
    /// probabilities it returns.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionResult, ModelError> {
        let scaled = self.artifacts.scaler().transform(row.as_slice())?;
        let probabilities = self.artifacts.classifier().predict_proba(&scaled)?;

        let result = PredictionResult::from_probabilities(probabilities);

        tracing::info!(
            class = result.class,
            diagnosis = %result.diagnosis,
            confidence = result.confidence,
            "Prediction succeeded: {} ({:.2}%)",
            result.diagnosis,
            result.confidence
        );

        Ok(result)
    }
}
