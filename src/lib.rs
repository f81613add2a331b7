//! diarisk — client-side health-risk intake core.
//!
//! Modular structure:
//! - [`request`] — intake form payloads, coercion, degenerate-input detection
//! - [`parse`] — defensive normalization of the backend response
//! - [`fallback`] — bimodal estimated-risk generator
//! - [`risk`] — threshold classification, canonical result
//! - [`predict`] — prediction backend client
//! - [`session`] — submit-predict-handoff orchestration
//! - [`flow`] — one-shot screen handoff and results-screen contract
//! - [`history`] — most-recent-record refresh collaborator
//! - [`profile`] — local identity echo and patient lookup
//! - [`logging`] — structured logging

pub mod config;
pub mod request;
pub mod parse;
pub mod fallback;
pub mod risk;
pub mod predict;
pub mod session;
pub mod flow;
pub mod history;
pub mod profile;
pub mod logging;

pub use config::AppConfig;
pub use fallback::FallbackGenerator;
pub use flow::{Handoff, RenderedResult, ResultsScreen, Screen, ScreenOutcome};
pub use parse::{ParsedResponse, RiskSignal};
pub use predict::{HttpPredictClient, PredictCollaborator, PredictOutcome, TransportError};
pub use request::{PredictionRequest, ValidationError};
pub use risk::{CanonicalResult, Classification, ResultSource};
pub use session::{BackendAudit, PredictionSession, SessionState};
pub use logging::StructuredLogger;
