//! ONNX Runtime predictor for classifiers exported with skl2onnx.
//!
//! Expects one float input of shape `[N, 2]` and two outputs in order:
//! `label` (int64 `[N]`) and `probabilities` (float `[N, n_classes]`). Export
//! with `options={"zipmap": False}` so probabilities come back as a plain
//! tensor rather than a sequence of maps.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use passcheck_core::{FEATURE_NAMES, FeatureVector, Prediction};
use tracing::info;

use crate::{ModelError, PredictError, Predictor};

pub struct OnnxPredictor {
    // `Session::run` needs `&mut self`; the lock is held only for one inference.
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxPredictor {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let session = Session::builder()?.commit_from_file(path)?;

        let input = session
            .inputs()
            .first()
            .ok_or_else(|| ModelError::Invalid("model has no inputs".into()))?;
        if let Some(width) = infer_width(input.dtype())
            && width != FEATURE_NAMES.len()
        {
            return Err(ModelError::Invalid(format!(
                "model expects {width} features, passcheck provides {}",
                FEATURE_NAMES.len()
            )));
        }
        let input_name = input.name().to_string();

        if session.outputs().len() < 2 {
            return Err(ModelError::Invalid(format!(
                "expected label and probabilities outputs, got {}",
                session.outputs().len()
            )));
        }

        info!(model = %path.display(), input = %input_name, "loaded onnx classifier");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl Predictor for OnnxPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let [h, s] = features.to_array();
        let input = Tensor::from_array(([1i64, 2], vec![h as f32, s as f32].into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| PredictError::Unavailable("onnx session lock poisoned".into()))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input])?;

        let (_, labels) = outputs[0].try_extract_tensor::<i64>()?;
        let label = *labels
            .first()
            .ok_or_else(|| PredictError::Output("empty label tensor".into()))?;
        let class_id = usize::try_from(label)
            .map_err(|_| PredictError::Output(format!("negative class label {label}")))?;

        let (shape, probs) = outputs[1].try_extract_tensor::<f32>()?;
        let dims: &[i64] = shape;
        if dims.len() != 2 || dims[0] != 1 {
            return Err(PredictError::Output(format!(
                "unexpected probabilities shape {dims:?}, expected [1, n_classes]"
            )));
        }

        Ok(Prediction {
            class_id,
            probabilities: probs.iter().map(|&p| f64::from(p)).collect(),
        })
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

/// Feature count from the input type's last dimension, if static.
fn infer_width(input_type: &ort::value::ValueType) -> Option<usize> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}
