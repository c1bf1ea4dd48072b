use passcheck_core::{FeatureVector, Prediction};

use crate::PredictError;

/// A loaded binary classifier.
///
/// Implementations are immutable after construction and shared across
/// request tasks, hence `Send + Sync`.
pub trait Predictor: Send + Sync {
    /// Classify one feature vector, returning the class id and the full
    /// probability distribution indexed by class id.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError>;

    /// Short name of the backend, used in logs.
    fn kind(&self) -> &'static str;
}
