//! Feature vectors and the numeric coercion applied to incoming JSON fields.

use serde_json::Value;
use thiserror::Error;

/// JSON key holding the hours studied.
pub const STUDY_HOURS: &str = "study_hours";
/// JSON key holding the previous exam score.
pub const PREVIOUS_SCORE: &str = "previous_score";

/// Names of the model inputs, in feature order.
pub const FEATURE_NAMES: [&str; 2] = [STUDY_HOURS, PREVIOUS_SCORE];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("could not convert string to float: '{0}'")]
    InvalidString(String),

    #[error("float() argument must be a string or a real number, not '{0}'")]
    UnsupportedType(&'static str),

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: String },
}

/// The two model inputs, `[study_hours, previous_score]`.
///
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub study_hours: f64,
    pub previous_score: f64,
}

impl FeatureVector {
    pub fn new(study_hours: f64, previous_score: f64) -> Self {
        Self {
            study_hours,
            previous_score,
        }
    }

    /// Coerce both raw JSON values, rejecting anything that is not a finite number.
    pub fn from_json(study_hours: &Value, previous_score: &Value) -> Result<Self, CoerceError> {
        let study_hours = finite(STUDY_HOURS, coerce_f64(study_hours)?)?;
        let previous_score = finite(PREVIOUS_SCORE, coerce_f64(previous_score)?)?;
        Ok(Self::new(study_hours, previous_score))
    }

    /// Features in model input order.
    pub fn to_array(&self) -> [f64; 2] {
        [self.study_hours, self.previous_score]
    }
}

/// Lenient numeric coercion for a single JSON value.
///
/// Numbers pass through, booleans map to `1.0`/`0.0`, and strings are trimmed
/// and parsed as decimal floats. Null, arrays, and objects are rejected.
pub fn coerce_f64(value: &Value) -> Result<f64, CoerceError> {
    match value {
        // Literals beyond f64 range are kept as text and read back as infinities.
        Value::Number(n) => match n.as_f64() {
            Some(v) => Ok(v),
            None => {
                let raw = n.to_string();
                raw.parse::<f64>()
                    .map_err(|_| CoerceError::InvalidString(raw))
            }
        },
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoerceError::InvalidString(s.clone())),
        Value::Null => Err(CoerceError::UnsupportedType("NoneType")),
        Value::Array(_) => Err(CoerceError::UnsupportedType("list")),
        Value::Object(_) => Err(CoerceError::UnsupportedType("dict")),
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, CoerceError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoerceError::NotFinite {
            field,
            value: v.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(coerce_f64(&json!(8)).unwrap(), 8.0);
        assert_eq!(coerce_f64(&json!(-2.5)).unwrap(), -2.5);
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(coerce_f64(&json!("7.5")).unwrap(), 7.5);
        assert_eq!(coerce_f64(&json!("  42 ")).unwrap(), 42.0);
        assert_eq!(coerce_f64(&json!("1e2")).unwrap(), 100.0);
    }

    #[test]
    fn booleans_map_to_unit_values() {
        assert_eq!(coerce_f64(&json!(true)).unwrap(), 1.0);
        assert_eq!(coerce_f64(&json!(false)).unwrap(), 0.0);
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        let err = coerce_f64(&json!("abc")).unwrap_err();
        assert_eq!(err, CoerceError::InvalidString("abc".into()));
        assert_eq!(err.to_string(), "could not convert string to float: 'abc'");
    }

    #[test]
    fn structured_values_are_rejected() {
        assert_eq!(
            coerce_f64(&Value::Null).unwrap_err(),
            CoerceError::UnsupportedType("NoneType")
        );
        assert_eq!(
            coerce_f64(&Value::Null).unwrap_err().to_string(),
            "float() argument must be a string or a real number, not 'NoneType'"
        );
        assert_eq!(
            coerce_f64(&json!([1, 2])).unwrap_err(),
            CoerceError::UnsupportedType("list")
        );
        assert_eq!(
            coerce_f64(&json!({"v": 1})).unwrap_err(),
            CoerceError::UnsupportedType("dict")
        );
    }

    #[test]
    fn from_json_keeps_feature_order() {
        let fv = FeatureVector::from_json(&json!(8), &json!("90")).unwrap();
        assert_eq!(fv.to_array(), [8.0, 90.0]);
    }

    #[test]
    fn from_json_rejects_non_finite_strings() {
        let err = FeatureVector::from_json(&json!("inf"), &json!(70)).unwrap_err();
        assert!(matches!(
            err,
            CoerceError::NotFinite {
                field: STUDY_HOURS,
                ..
            }
        ));

        let err = FeatureVector::from_json(&json!(3), &json!("NaN")).unwrap_err();
        assert!(err.to_string().starts_with("previous_score must be a finite number"));
    }

    #[test]
    fn out_of_range_literal_is_not_finite() {
        let v: Value = serde_json::from_str("1e400").unwrap();
        assert_eq!(coerce_f64(&v).unwrap(), f64::INFINITY);

        let err = FeatureVector::from_json(&v, &json!(70)).unwrap_err();
        assert!(matches!(
            err,
            CoerceError::NotFinite {
                field: STUDY_HOURS,
                ..
            }
        ));
    }
}
