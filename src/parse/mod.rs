//! Defensive extraction of a risk percent and a label hint from an untyped
//! backend payload. The backend's shape is not under our control; every known
//! field convention is tried in a fixed order and absence is a first-class
//! outcome, not a null.

use crate::risk::Classification;
use serde_json::Value;

/// Fields consulted for a percentage-formatted string ("24.46%"), in priority order.
const PERCENT_STRING_FIELDS: [&str; 2] = ["risk_percent", "risk_level"];

/// Probability-like numeric aliases, in priority order.
const PROBABILITY_FIELDS: [&str; 4] = ["probability", "proba", "score", "risk_percent"];

/// Textual classification aliases.
const LABEL_FIELDS: [&str; 3] = ["result", "prediction", "label"];

/// Extraction outcome for the numeric signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskSignal {
    /// Clamped, rounded percent in [0,100]
    Found(u8),
    /// No known field yielded a finite number; caller must fall back
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedResponse {
    pub signal: RiskSignal,
    /// Textual label from the payload, when recognizably positive or negative.
    /// Diagnostic only; the threshold stays authoritative for classification.
    pub label_hint: Option<Classification>,
}

pub fn parse(payload: &Value) -> ParsedResponse {
    ParsedResponse {
        signal: extract_percent(payload),
        label_hint: extract_label(payload),
    }
}

fn extract_percent(payload: &Value) -> RiskSignal {
    // 1. A numeric field literally named "risk".
    if let Some(n) = numeric(payload.get("risk")) {
        return RiskSignal::Found(clamp_percent(n));
    }

    // 2. A percentage-formatted string; strip the suffix and parse.
    for field in PERCENT_STRING_FIELDS {
        if let Some(s) = payload.get(field).and_then(Value::as_str) {
            if let Some(stripped) = s.trim().strip_suffix('%') {
                if let Ok(v) = stripped.trim().parse::<f64>() {
                    if v.is_finite() {
                        return RiskSignal::Found(clamp_percent(v));
                    }
                }
            }
        }
    }

    // 3. Probability-like numerics: [0,1] scales to percent, (1,100] is taken as-is.
    for field in PROBABILITY_FIELDS {
        if let Some(n) = numeric(payload.get(field)) {
            let percent = if n <= 1.0 { n * 100.0 } else { n };
            return RiskSignal::Found(clamp_percent(percent));
        }
    }

    RiskSignal::NotFound
}

fn extract_label(payload: &Value) -> Option<Classification> {
    for field in LABEL_FIELDS {
        if let Some(s) = payload.get(field).and_then(Value::as_str) {
            let text = s.trim();
            if text.is_empty() {
                continue;
            }
            let lower = text.to_lowercase();
            if lower.contains("pos") {
                return Some(Classification::Positive);
            }
            if lower.contains("neg") {
                return Some(Classification::Negative);
            }
            // First non-empty label field decides, matching or not.
            return None;
        }
    }
    None
}

/// Finite number from a JSON number or a numeric string; anything else is absent.
fn numeric(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn clamp_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
