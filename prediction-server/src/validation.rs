//! Input validation for prediction requests
//!
//! Turns a raw JSON payload into a single feature row or a tagged error.
//! No I/O and no dependency on the HTTP layer.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("No data provided")]
    MissingBody,

    #[error("Field 'features' is required")]
    MissingField,

    #[error("Features must be a list")]
    WrongType,

    #[error("Expected {expected} features, received {received}")]
    WrongLength { expected: usize, received: usize },

    #[error("All features must be numeric values")]
    NonNumeric,

    #[error("Features contain invalid values (NaN or infinity)")]
    InvalidValue,
}

/// One sample, in the order of the model's `feature_names`
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow(Vec<f64>);

impl FeatureRow {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Decode a request body into a JSON value.
///
/// An empty or whitespace-only body is `null` (reported as a missing body).
/// Strict JSON is tried first; on failure the body is re-read with the
/// JSON5 grammar, which accepts the `NaN`/`Infinity` tokens many JSON
/// encoders emit. Non-finite and out-of-range numbers come back as `null`,
/// which the validator reports as an invalid value.
pub fn parse_body(body: &[u8]) -> Result<Value, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(strict) => {
            let text = std::str::from_utf8(body).map_err(|_| strict.to_string())?;
            json5::from_str(text).map_err(|_| strict.to_string())
        }
    }
}

/// Validate `{"features": [...]}` against the expected feature count
pub fn validate(payload: &Value, expected: usize) -> Result<FeatureRow, ValidationError> {
    if is_empty_payload(payload) {
        return Err(ValidationError::MissingBody);
    }

    let features = payload
        .as_object()
        .and_then(|obj| obj.get("features"))
        .ok_or(ValidationError::MissingField)?;

    let items = features.as_array().ok_or(ValidationError::WrongType)?;

    if items.len() != expected {
        return Err(ValidationError::WrongLength {
            expected,
            received: items.len(),
        });
    }

    // Coerce everything first: a non-numeric element wins over NaN/inf
    let values = items
        .iter()
        .map(coerce)
        .collect::<Option<Vec<f64>>>()
        .ok_or(ValidationError::NonNumeric)?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::InvalidValue);
    }

    Ok(FeatureRow(values))
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Numeric-array coercion: numbers, booleans, numeric strings; null is NaN
fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => Some(f64::NAN),
        Value::Array(_) | Value::Object(_) => None,
    }
}
