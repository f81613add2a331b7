//! Threshold classification and the canonical result downstream screens render.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Positive,
    Negative,
}

impl Classification {
    /// Pure threshold mapping; the single source of truth for the label.
    pub fn from_percent(percent: u8, threshold: u8) -> Self {
        if percent >= threshold {
            Classification::Positive
        } else {
            Classification::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == Classification::Positive
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Positive => "Positive",
            Classification::Negative => "Negative",
        }
    }
}

/// Where the normalized percent came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Extracted from the backend response
    Backend,
    /// Offline symptom-count estimate
    Heuristic,
    /// Synthesized fallback band draw
    Fallback,
}

/// The normalized pair every consumer renders. Invariant: `classification`
/// equals `Classification::from_percent(risk_percent, threshold)` at the
/// threshold it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalResult {
    pub risk_percent: u8,
    pub classification: Classification,
    pub source: ResultSource,
}

impl CanonicalResult {
    pub fn from_percent(percent: u8, threshold: u8, source: ResultSource) -> Self {
        Self {
            risk_percent: percent.min(100),
            classification: Classification::from_percent(percent, threshold),
            source,
        }
    }
}
