//! Model gateway: one pre-trained binary classifier, loaded once, shared read-only.

mod error;
mod gateway;
mod logistic;
#[cfg(feature = "onnx")]
mod onnx;
mod predictor;

pub use error::{ModelError, PredictError};
pub use gateway::{ModelGateway, ModelKind};
pub use logistic::LogisticModel;
#[cfg(feature = "onnx")]
pub use onnx::OnnxPredictor;
pub use predictor::Predictor;
