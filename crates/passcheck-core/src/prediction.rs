//! Predictor output and the response body built from it.

use serde::{Deserialize, Serialize};

/// Raw predictor output for one feature vector.
///
/// `probabilities` is indexed by class id, so `probabilities[class_id]` is
/// the probability of the predicted class.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_id: usize,
    pub probabilities: Vec<f64>,
}

impl Prediction {
    /// Probability of the predicted class, if the distribution covers it.
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities.get(self.class_id).copied()
    }
}

/// Human-facing label for a class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    /// Class 1 is the positive class; every other id reads as a fail.
    pub fn from_class_id(class_id: usize) -> Self {
        if class_id == 1 { Self::Pass } else { Self::Fail }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// Body of a successful `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Outcome,
    pub class: usize,
    /// Probability of the predicted class, rounded to 4 decimal places.
    pub confidence: f64,
    #[serde(rename = "resultText")]
    pub result_text: String,
}

impl PredictionResult {
    /// Build the response body, or `None` when the distribution has no entry
    /// for the predicted class.
    pub fn from_prediction(prediction: &Prediction) -> Option<Self> {
        let confidence = round4(prediction.confidence()?);
        let outcome = Outcome::from_class_id(prediction.class_id);
        Some(Self {
            prediction: outcome,
            class: prediction.class_id,
            confidence,
            result_text: format!("{} ({:.2}%)", outcome.as_str(), confidence * 100.0),
        })
    }
}

/// Round to 4 decimal places from the exact binary value, so `0.50005`
/// (stored just below the tie) becomes `0.5`.
pub fn round4(v: f64) -> f64 {
    format!("{v:.4}").parse().unwrap_or(v)
}
