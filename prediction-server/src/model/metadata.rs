//! Training metadata shipped inside the artifact bundle

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Metadata written by the training job.
///
/// Only `feature_names` is required: its length fixes the number of
/// features every request must carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub feature_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_auc: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_params: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion_matrix: Option<Vec<Vec<u64>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_features: Option<Vec<FeatureImportance>>,
}

impl ModelMetadata {
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            feature_names,
            trained_at: None,
            test_auc: None,
            best_params: None,
            best_score: None,
            confusion_matrix: None,
            top_features: None,
        }
    }

    pub fn features_count(&self) -> usize {
        self.feature_names.len()
    }
}
