//! Turns raw model output into a [`CredibilityResult`].
//!
//! The model is told to reply with a bare JSON object, but nothing guarantees it
//! does. Everything here treats the reply as untrusted input: numbers are range
//! checked and rounded, the label must match exactly, and failures carry only a
//! bounded preview of the offending text.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::types::{CredibilityLabel, CredibilityResult, CredibilitySubscores};
use crate::text::take_chars;

pub const FALLBACK_EXPLANATION: &str = "No explanation provided.";

const PREVIEW_CHARS: usize = 200;
const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("model output was not valid JSON: {message}")]
    MalformedOutput { message: String, preview: String },

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    fn malformed(message: impl Into<String>, text: &str) -> Self {
        Self::MalformedOutput {
            message: message.into(),
            preview: take_chars(text, PREVIEW_CHARS).to_string(),
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub fn validate(raw: &str) -> Result<CredibilityResult, ValidationError> {
    let json_str = strip_code_fence(raw);

    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| ValidationError::malformed(e.to_string(), json_str))?;

    let Value::Object(obj) = value else {
        return Err(ValidationError::malformed(
            "model output was not a JSON object",
            json_str,
        ));
    };

    let score = bounded_score(obj.get("score"), "score")?;
    let label = label_field(obj.get("label"))?;
    let explanation = match obj.get("explanation") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => FALLBACK_EXPLANATION.to_string(),
    };
    let subscores = match obj.get("subscores") {
        Some(Value::Object(sub)) => subscores_field(sub)?,
        _ => None,
    };

    Ok(CredibilityResult {
        score,
        label,
        explanation,
        subscores,
    })
}

/// Trims the reply and peels off a surrounding ``` or ```json fence if present.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut s = raw.trim();

    if let Some(rest) = s.strip_prefix("```") {
        s = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

/// Shared rule for `score` and every subscore: finite, within 0-100, rounded
/// half away from zero.
pub fn bounded_score(value: Option<&Value>, field: &'static str) -> Result<u8, ValidationError> {
    let n = value
        .and_then(coerce_number)
        .ok_or_else(|| ValidationError::invalid(field, "not a number"))?;

    if !n.is_finite() {
        return Err(ValidationError::invalid(field, "not a number"));
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&n) {
        return Err(ValidationError::invalid(field, "must be 0-100"));
    }

    // in range, so the cast cannot truncate
    Ok(n.round() as u8)
}

/// Loose numeric coercion: `null`, `false`, `""` and `[]` read as 0, `true` as 1,
/// strings are trimmed and parsed (hex, octal and binary prefixes included) and a
/// one-element array reads as its element. Objects and bigger arrays are not
/// numbers.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            // a lone element is read through its string form, where null is ""
            [Value::Null] => Some(0.0),
            [Value::Bool(_)] | [Value::Object(_)] => None,
            [item] => coerce_number(item),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &s[2..];
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    // only finite decimal literals; "inf" and "nan" spellings are not numbers here
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn label_field(value: Option<&Value>) -> Result<CredibilityLabel, ValidationError> {
    value
        .and_then(Value::as_str)
        .and_then(CredibilityLabel::parse)
        .ok_or_else(|| ValidationError::invalid("label", "must be one of low, medium, high"))
}

fn subscores_field(
    obj: &Map<String, Value>,
) -> Result<Option<CredibilitySubscores>, ValidationError> {
    let field = |name: &'static str| -> Result<Option<u8>, ValidationError> {
        match obj.get(name) {
            None => Ok(None),
            Some(value) => bounded_score(Some(value), name).map(Some),
        }
    };

    let subscores = CredibilitySubscores {
        source_reliability: field("sourceReliability")?,
        factual_consistency: field("factualConsistency")?,
        tone_and_bias: field("toneAndBias")?,
    };

    Ok((!subscores.is_empty()).then_some(subscores))
}
