//! The single process-wide predictor.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use passcheck_core::{FeatureVector, Prediction};
use tracing::{debug, info};

use crate::{LogisticModel, ModelError, PredictError, Predictor};

/// Artifact formats the gateway knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Logistic-regression weights as JSON.
    Logistic,
    /// ONNX graph run through ONNX Runtime.
    Onnx,
}

impl ModelKind {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Logistic),
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => Ok(Self::Onnx),
            _ => Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::Onnx => "onnx",
        }
    }
}

/// Owns the loaded predictor for the lifetime of the process.
///
/// Cloning is cheap and every clone shares the same predictor.
#[derive(Clone)]
pub struct ModelGateway {
    predictor: Arc<dyn Predictor>,
    source: Option<PathBuf>,
}

impl ModelGateway {
    /// Load the artifact at `path`. Any failure here means the service must
    /// not start.
    pub fn initialize(path: &Path) -> Result<Self, ModelError> {
        let kind = ModelKind::from_path(path)?;
        let predictor: Arc<dyn Predictor> = match kind {
            ModelKind::Logistic => Arc::new(LogisticModel::load(path)?),
            ModelKind::Onnx => load_onnx(path)?,
        };
        info!(model = %path.display(), kind = kind.as_str(), "model loaded");
        Ok(Self {
            predictor,
            source: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already-constructed predictor.
    pub fn from_predictor(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            source: None,
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let prediction = self.predictor.predict(features)?;
        debug!(
            study_hours = features.study_hours,
            previous_score = features.previous_score,
            class_id = prediction.class_id,
            "inference"
        );
        Ok(prediction)
    }

    /// Path the predictor was loaded from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn kind(&self) -> &'static str {
        self.predictor.kind()
    }
}

impl fmt::Debug for ModelGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelGateway")
            .field("kind", &self.kind())
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    Ok(Arc::new(crate::OnnxPredictor::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    Err(ModelError::OnnxDisabled(path.to_path_buf()))
}
