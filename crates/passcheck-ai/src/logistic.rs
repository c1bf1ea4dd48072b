//! Portable logistic-regression artifact.
//!
//! The JSON layout mirrors the fitted attributes of a scikit-learn
//! `LogisticRegression`: `classes_`, `coef_`, and `intercept_`. A binary model
//! has one coefficient row and one intercept; the decision score
//! `z = w·x + b` is the log-odds of class 1.

use std::path::Path;

use passcheck_core::{FEATURE_NAMES, FeatureVector, Prediction};
use serde::{Deserialize, Serialize};

use crate::{ModelError, PredictError, Predictor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Class labels in probability order. Must be `[0, 1]`.
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
    /// One row of weights, one weight per feature.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// Optional feature names recorded at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

impl LogisticModel {
    /// Load and validate a model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes != [0, 1] {
            return Err(ModelError::Invalid(format!(
                "expected classes [0, 1], got {:?}",
                self.classes
            )));
        }
        let [row] = self.coef.as_slice() else {
            return Err(ModelError::Invalid(format!(
                "expected 1 coefficient row, got {}",
                self.coef.len()
            )));
        };
        if row.len() != FEATURE_NAMES.len() {
            return Err(ModelError::Invalid(format!(
                "expected {} coefficients, got {}",
                FEATURE_NAMES.len(),
                row.len()
            )));
        }
        if self.intercept.len() != 1 {
            return Err(ModelError::Invalid(format!(
                "expected 1 intercept, got {}",
                self.intercept.len()
            )));
        }
        if !row.iter().chain(&self.intercept).all(|w| w.is_finite()) {
            return Err(ModelError::Invalid("non-finite weight".into()));
        }
        if let Some(names) = &self.feature_names
            && names.iter().map(String::as_str).ne(FEATURE_NAMES)
        {
            return Err(ModelError::Invalid(format!(
                "feature names {names:?} do not match {FEATURE_NAMES:?}"
            )));
        }
        Ok(())
    }

    /// Log-odds of class 1.
    pub fn decision(&self, features: &FeatureVector) -> f64 {
        let weights = &self.coef[0];
        let dot: f64 = weights
            .iter()
            .zip(features.to_array())
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercept[0]
    }
}

impl Predictor for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let z = self.decision(features);
        let p1 = sigmoid(z);
        Ok(Prediction {
            class_id: usize::from(z > 0.0),
            probabilities: vec![1.0 - p1, p1],
        })
    }

    fn kind(&self) -> &'static str {
        "logistic"
    }
}

/// Logistic function, split by sign so `exp` never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REFERENCE: &str = r#"{
        "classes": [0, 1],
        "coef": [[0.9, 0.08]],
        "intercept": [-9.0],
        "feature_names": ["study_hours", "previous_score"]
    }"#;

    fn reference() -> LogisticModel {
        LogisticModel::from_json_str(REFERENCE).unwrap()
    }

    #[test]
    fn high_inputs_predict_pass() {
        let p = reference().predict(&FeatureVector::new(8.0, 90.0)).unwrap();
        assert_eq!(p.class_id, 1);
        assert!((p.probabilities[1] - 0.995_503_726_8).abs() < 1e-9);
    }

    #[test]
    fn low_inputs_predict_fail() {
        let p = reference().predict(&FeatureVector::new(1.0, 40.0)).unwrap();
        assert_eq!(p.class_id, 0);
        assert!((p.probabilities[0] - 0.992_608_458_6).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = reference();
        for (h, s) in [(0.0, 0.0), (5.0, 70.0), (-3.0, 1e6), (1e6, -1e6)] {
            let p = model.predict(&FeatureVector::new(h, s)).unwrap();
            let sum: f64 = p.probabilities.iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "({h}, {s}) sums to {sum}");
            assert!(p.probabilities.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn zero_score_falls_to_class_zero() {
        let model = LogisticModel {
            classes: vec![0, 1],
            coef: vec![vec![0.0, 0.0]],
            intercept: vec![0.0],
            feature_names: None,
        };
        let p = model.predict(&FeatureVector::new(3.0, 3.0)).unwrap();
        assert_eq!(p.class_id, 0);
        assert_eq!(p.probabilities, vec![0.5, 0.5]);
    }

    #[test]
    fn classes_default_when_omitted() {
        let model =
            LogisticModel::from_json_str(r#"{"coef": [[1.0, 1.0]], "intercept": [0.0]}"#).unwrap();
        assert_eq!(model.classes, vec![0, 1]);
    }

    #[test]
    fn rejects_wrong_classes() {
        let err = LogisticModel::from_json_str(
            r#"{"classes": [1, 2], "coef": [[1.0, 1.0]], "intercept": [0.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn rejects_wrong_coefficient_shape() {
        for raw in [
            r#"{"coef": [[1.0]], "intercept": [0.0]}"#,
            r#"{"coef": [[1.0, 1.0], [2.0, 2.0]], "intercept": [0.0]}"#,
            r#"{"coef": [[1.0, 1.0]], "intercept": []}"#,
        ] {
            let err = LogisticModel::from_json_str(raw).unwrap_err();
            assert!(matches!(err, ModelError::Invalid(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn rejects_mismatched_feature_names() {
        let err = LogisticModel::from_json_str(
            r#"{"coef": [[1.0, 1.0]], "intercept": [0.0], "feature_names": ["previous_score", "study_hours"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("feature names"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = LogisticModel::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REFERENCE.as_bytes()).unwrap();
        let model = LogisticModel::load(file.path()).unwrap();
        assert_eq!(model, reference());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogisticModel::load(&dir.path().join("model.json")).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }
}
