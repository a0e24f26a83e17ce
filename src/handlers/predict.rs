//! Predict handler

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::classifier::FEATURE_COUNT;
use crate::{AppError, AppResult, AppState};

/// Required body keys, in classifier column order.
const FEATURE_KEYS: [&str; FEATURE_COUNT] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

#[derive(Debug, Serialize)]
pub struct Prediction {
    pub diabetes: i64,
}

/// Outcome of coercing one body value to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coerced {
    Value(f32),
    Missing,
    NotANumber,
}

/// Score one feature vector against the current classifier.
///
/// The body is taken as raw JSON: the contract distinguishes an absent key
/// from a present-but-non-numeric one, which a typed extractor collapses.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Prediction>> {
    // Readiness is checked before the body is even looked at.
    let Some(classifier) = state.classifier.current() else {
        return Err(AppError::NotReady);
    };

    let Json(data) = body.map_err(|e| AppError::Internal(e.to_string()))?;

    let mut features = [0.0f32; FEATURE_COUNT];
    let mut missing = false;
    let mut invalid = false;

    for (i, key) in FEATURE_KEYS.iter().enumerate() {
        match coerce_numeric(data.get(*key)) {
            Coerced::Value(v) => features[i] = v,
            Coerced::Missing => missing = true,
            Coerced::NotANumber => invalid = true,
        }
    }

    if missing {
        return Err(AppError::MissingParameters);
    }
    if invalid {
        return Err(AppError::InvalidValues);
    }

    let diabetes = classifier.predict_one(features)?;
    tracing::debug!("Predicted diabetes: {}", diabetes);

    Ok(Json(Prediction { diabetes }))
}

/// Numeric coercion: JSON numbers pass through, strings get a numeric
/// parse, absent keys and nulls are missing, everything else (and a parse
/// yielding NaN) is not-a-number.
fn coerce_numeric(value: Option<&Value>) -> Coerced {
    match value {
        None | Some(Value::Null) => Coerced::Missing,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => Coerced::Value(v as f32),
            None => Coerced::NotANumber,
        },
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() => Coerced::Value(v as f32),
            _ => Coerced::NotANumber,
        },
        Some(_) => Coerced::NotANumber,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_integers_and_floats() {
        assert_eq!(coerce_numeric(Some(&json!(6))), Coerced::Value(6.0));
        assert_eq!(coerce_numeric(Some(&json!(33.6))), Coerced::Value(33.6));
    }

    #[test]
    fn coerces_numeric_strings() {
        assert_eq!(coerce_numeric(Some(&json!("148"))), Coerced::Value(148.0));
        assert_eq!(coerce_numeric(Some(&json!("0.627"))), Coerced::Value(0.627));
        assert_eq!(coerce_numeric(Some(&json!(" 72 "))), Coerced::Value(72.0));
    }

    #[test]
    fn absent_and_null_are_missing() {
        assert_eq!(coerce_numeric(None), Coerced::Missing);
        assert_eq!(coerce_numeric(Some(&Value::Null)), Coerced::Missing);
    }

    #[test]
    fn non_numeric_values_are_not_a_number() {
        assert_eq!(coerce_numeric(Some(&json!("abc"))), Coerced::NotANumber);
        assert_eq!(coerce_numeric(Some(&json!("NaN"))), Coerced::NotANumber);
        assert_eq!(coerce_numeric(Some(&json!(true))), Coerced::NotANumber);
        assert_eq!(coerce_numeric(Some(&json!([1, 2]))), Coerced::NotANumber);
        assert_eq!(coerce_numeric(Some(&json!({"v": 1}))), Coerced::NotANumber);
    }
}
