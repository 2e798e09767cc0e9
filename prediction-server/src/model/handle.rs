//! Process-wide handle to the loaded model
//!
//! Filled exactly once. Readers never wait: before the slot is filled they
//! get `None` and the caller answers "model not loaded".

use std::sync::{Arc, OnceLock};

use super::{ArtifactError, ModelArtifacts};

#[derive(Clone, Default)]
pub struct ModelHandle {
    slot: Arc<OnceLock<Arc<ModelArtifacts>>>,
}

impl ModelHandle {
    /// Empty handle; `get()` returns `None` until `install` succeeds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(artifacts: ModelArtifacts) -> Self {
        let handle = Self::new();
        // A fresh slot cannot already be filled
        let _ = handle.slot.set(Arc::new(artifacts));
        handle
    }

    pub fn install(&self, artifacts: ModelArtifacts) -> Result<(), ArtifactError> {
        self.slot
            .set(Arc::new(artifacts))
            .map_err(|_| ArtifactError::AlreadyLoaded)
    }

    pub fn get(&self) -> Option<Arc<ModelArtifacts>> {
        self.slot.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DecisionTree, ModelMetadata, Node, RandomForest, StandardScaler};

    fn artifacts() -> ModelArtifacts {
        ModelArtifacts::new(
            Box::new(StandardScaler::new(vec![0.0], vec![1.0])),
            Box::new(RandomForest::new(
                1,
                vec![DecisionTree::new(vec![Node::Leaf { value: vec![1.0, 1.0] }])],
            )),
            ModelMetadata::new(vec!["x".to_string()]),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_handle_reports_not_loaded() {
        let handle = ModelHandle::new();
        assert!(!handle.is_loaded());
        assert!(handle.get().is_none());
    }

    #[test]
    fn test_install_is_visible_to_clones() {
        let handle = ModelHandle::new();
        let reader = handle.clone();

        handle.install(artifacts()).unwrap();
        assert!(reader.is_loaded());
        assert_eq!(reader.get().unwrap().feature_count(), 1);
    }

    #[test]
    fn test_install_twice_fails() {
        let handle = ModelHandle::loaded(artifacts());
        assert!(matches!(
            handle.install(artifacts()),
            Err(ArtifactError::AlreadyLoaded)
        ));
    }
}
