//! Classifier training and the process-wide model slot

use std::sync::Arc;

use aprender::primitives::Matrix;
use aprender::tree::RandomForestClassifier;
use parking_lot::RwLock;
use thiserror::Error;

/// Number of input features per sample
pub const FEATURE_COUNT: usize = 8;

/// Forest hyperparameters
const N_ESTIMATORS: usize = 100;
const MAX_DEPTH: usize = 2;
const RANDOM_STATE: u64 = 0;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier training failed: {0}")]
    Train(String),

    #[error("classifier prediction failed: {0}")]
    Predict(String),
}

/// A fitted random forest over the 8 diabetes features.
pub struct TrainedClassifier {
    forest: RandomForestClassifier,
}

impl TrainedClassifier {
    /// Fit a new forest on the full training set.
    pub fn train(
        features: &[[f32; FEATURE_COUNT]],
        labels: &[usize],
    ) -> Result<Self, ClassifierError> {
        let n_samples = features.len();
        let mut data = Vec::with_capacity(n_samples * FEATURE_COUNT);
        for row in features {
            data.extend_from_slice(row);
        }

        let x = Matrix::from_vec(n_samples, FEATURE_COUNT, data)
            .map_err(|e| ClassifierError::Train(e.to_string()))?;

        let mut forest = RandomForestClassifier::new(N_ESTIMATORS)
            .with_max_depth(MAX_DEPTH)
            .with_random_state(RANDOM_STATE);
        forest
            .fit(&x, labels)
            .map_err(|e| ClassifierError::Train(e.to_string()))?;

        Ok(Self { forest })
    }

    /// Predict the label for a single sample.
    pub fn predict_one(&self, features: [f32; FEATURE_COUNT]) -> Result<i64, ClassifierError> {
        let x = Matrix::from_vec(1, FEATURE_COUNT, features.to_vec())
            .map_err(|e| ClassifierError::Predict(e.to_string()))?;

        self.forest
            .predict(&x)
            .first()
            .map(|&label| label as i64)
            .ok_or_else(|| ClassifierError::Predict("no prediction returned".to_string()))
    }
}

/// Process-wide slot holding the most recently trained classifier.
///
/// Empty until the first successful reload. `replace` publishes a fully
/// trained model in one swap; readers clone the `Arc` out and never hold
/// the lock across inference, so an in-flight predict keeps the model it
/// started with even if a reload lands mid-request.
#[derive(Default)]
pub struct ClassifierSlot {
    current: RwLock<Option<Arc<TrainedClassifier>>>,
}

impl ClassifierSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a newly trained classifier, replacing any previous one.
    pub fn replace(&self, classifier: TrainedClassifier) {
        *self.current.write() = Some(Arc::new(classifier));
    }

    /// The current classifier, if any reload has completed.
    pub fn current(&self) -> Option<Arc<TrainedClassifier>> {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
