use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an artifact on disk into a predictor.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("unsupported model format {0:?} (expected .json or .onnx)")]
    UnsupportedFormat(PathBuf),

    #[error("{0:?} is an ONNX model but passcheck was built without the `onnx` feature")]
    OnnxDisabled(PathBuf),

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(#[from] ort::Error),
}

/// Failure while running inference on a loaded predictor.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model produced unexpected output: {0}")]
    Output(String),

    #[error("predictor is unavailable: {0}")]
    Unavailable(String),

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(#[from] ort::Error),
}
