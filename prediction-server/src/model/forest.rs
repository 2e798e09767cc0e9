//! Random forest evaluator
//!
//! Trees are stored as flat node arrays, root at index 0. A split sends the
//! row left when `row[feature] <= threshold`, matching how the trees were
//! fitted. Leaves hold per-class weights (sample counts or fractions); each
//! tree votes with its normalized leaf distribution and the forest averages
//! the votes.

use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Walk from the root to a leaf and return its class distribution
    fn leaf_distribution(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        let mut index = 0;

        // A well-formed tree reaches a leaf in at most `nodes.len()` steps
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(Node::Split { feature, threshold, left, right }) => {
                    let x = row.get(*feature).ok_or(ModelError::Dimension {
                        expected: feature + 1,
                        actual: row.len(),
                    })?;
                    index = if *x <= *threshold { *left } else { *right };
                }
                Some(Node::Leaf { value }) => return normalize(value),
                None => {
                    return Err(ModelError::Corrupt(format!("node {} out of range", index)));
                }
            }
        }

        Err(ModelError::Corrupt("tree does not terminate".to_string()))
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    if *feature >= n_features {
                        return Err(format!("node {} splits on unknown feature {}", i, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", i));
                    }
                    // Children must point forward so every walk terminates
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                Node::Leaf { value } => {
                    normalize(value).map_err(|e| format!("node {}: {}", i, e))?;
                }
            }
        }

        Ok(())
    }
}

fn normalize(value: &[f64]) -> Result<[f64; 2], ModelError> {
    let [negative, positive] = value else {
        return Err(ModelError::Corrupt(format!(
            "leaf has {} class weights, expected 2",
            value.len()
        )));
    };

    if !negative.is_finite() || !positive.is_finite() || *negative < 0.0 || *positive < 0.0 {
        return Err(ModelError::Corrupt("leaf has invalid class weights".to_string()));
    }

    let total = negative + positive;
    if total <= 0.0 {
        return Err(ModelError::Corrupt("leaf has no class weight".to_string()));
    }

    Ok([negative / total, positive / total])
}

fn default_classes() -> Vec<u8> {
    vec![0, 1]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForest {
    pub n_features: usize,
    #[serde(default = "default_classes")]
    pub classes: Vec<u8>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Self {
        Self {
            n_features,
            classes: default_classes(),
            trees,
        }
    }

    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<(), String> {
        if self.classes != default_classes() {
            return Err(format!("expected classes [0, 1], got {:?}", self.classes));
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::Dimension {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::Corrupt("forest has no trees".to_string()));
        }

        let mut sum = [0.0; 2];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_distribution(row)?;
            sum[0] += p0;
            sum[1] += p1;
        }

        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}
