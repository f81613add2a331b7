//! Intake form payloads: Pima-style lab form and symptom questionnaire.
//! Raw form strings are coerced here so nothing downstream sees UI state.

mod pima;
mod symptoms;

pub use pima::{PimaForm, PimaRequest};
pub use symptoms::{SymptomAnswers, SymptomsForm, SymptomsRequest, YesNo, SYMPTOM_COUNT};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pre-submit validation failure; recoverable by user correction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Either intake payload, serialized with the exact key set the backend expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Pima(PimaRequest),
    Symptoms(SymptomsRequest),
}

impl PredictionRequest {
    /// Every field normalizes to zero; such a request never reaches the backend.
    pub fn is_degenerate(&self) -> bool {
        match self {
            PredictionRequest::Pima(r) => r.is_all_zero(),
            PredictionRequest::Symptoms(r) => r.is_all_zero(),
        }
    }

    /// Offline symptom-count estimate; only the symptom form carries one.
    pub fn heuristic_score(&self) -> Option<u8> {
        match self {
            PredictionRequest::Pima(_) => None,
            PredictionRequest::Symptoms(r) => Some(r.heuristic_score()),
        }
    }

    pub fn form_name(&self) -> &'static str {
        match self {
            PredictionRequest::Pima(_) => "pima",
            PredictionRequest::Symptoms(_) => "symptoms",
        }
    }
}

/// Coerce a raw form string to a number; non-numeric input counts as 0.
pub fn coerce_num(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Coerce a raw form string to a whole number; non-numeric input counts as 0.
pub fn coerce_int(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}
