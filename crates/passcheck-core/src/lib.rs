//! Core types shared by the passcheck gateway, server, and CLI.

pub mod features;
pub mod prediction;

pub use features::{
    CoerceError, FEATURE_NAMES, FeatureVector, PREVIOUS_SCORE, STUDY_HOURS, coerce_f64,
};
pub use prediction::{Outcome, Prediction, PredictionResult, round4};
