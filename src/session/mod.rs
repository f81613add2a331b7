//! One submit-predict-handoff cycle. `submit` always resolves: degenerate
//! input, transport failure, rejection, and parse misses all route to the
//! fallback bands so the user still reaches a results screen.

use crate::fallback::FallbackGenerator;
use crate::config::RiskConfig;
use crate::parse::{self, RiskSignal};
use crate::predict::{diagnostic_detail, PredictCollaborator, PredictOutcome};
use crate::request::PredictionRequest;
use crate::risk::{CanonicalResult, Classification, ResultSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

/// What the backend actually said, kept alongside the normalized result for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendAudit {
    /// 2xx body as received
    Response { payload: Value },
    /// Transport failure or rejection detail
    Error { detail: String },
    /// All-zero request; the backend was never called
    SkippedDegenerate,
}

/// Carried exactly once from the submitting screen to the results screen.
/// Not persisted; ownership transfers with the navigation handoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub request: PredictionRequest,
    pub result: CanonicalResult,
    pub backend: BackendAudit,
    /// Transient acknowledgment shown before navigation
    pub toast: String,
}

/// Optional percent source consulted before the randomized fallback when a
/// successful response carries no numeric signal.
pub type HeuristicHook = fn(&PredictionRequest) -> Option<u8>;

pub struct PredictionSession<C> {
    collaborator: C,
    fallback: FallbackGenerator,
    risk: RiskConfig,
    heuristic: Option<HeuristicHook>,
}

impl<C: PredictCollaborator> PredictionSession<C> {
    pub fn new(collaborator: C, fallback: FallbackGenerator, risk: RiskConfig) -> Self {
        Self {
            collaborator,
            fallback,
            risk,
            heuristic: None,
        }
    }

    pub fn with_heuristic(mut self, hook: HeuristicHook) -> Self {
        self.heuristic = Some(hook);
        self
    }

    /// Always resolves with a renderable state; never an error.
    pub async fn submit(&self, request: PredictionRequest) -> SessionState {
        if request.is_degenerate() {
            info!(form = request.form_name(), "all-zero request; skipping backend call");
            let result = self.fallback_result();
            return self.state(
                request,
                result,
                BackendAudit::SkippedDegenerate,
                "Inputs are all zero. Showing an estimated risk.",
            );
        }

        match self.collaborator.predict(&request).await {
            Ok(PredictOutcome::Success(payload)) => {
                let result = self.normalize(&request, &payload);
                info!(
                    percent = result.risk_percent,
                    classification = result.classification.as_str(),
                    source = ?result.source,
                    "prediction normalized"
                );
                self.state(
                    request,
                    result,
                    BackendAudit::Response { payload },
                    "Prediction successful",
                )
            }
            Ok(PredictOutcome::Failure { status, body, raw }) => {
                let detail = diagnostic_detail(&body, &raw, status);
                warn!(status, detail = %detail, "predict rejected; using estimated risk");
                let result = self.fallback_result();
                self.state(
                    request,
                    result,
                    BackendAudit::Error { detail },
                    "Prediction service unavailable. Showing an estimated risk.",
                )
            }
            Err(err) => {
                warn!(error = %err, "predict transport failure; using estimated risk");
                let result = self.fallback_result();
                self.state(
                    request,
                    result,
                    BackendAudit::Error {
                        detail: err.to_string(),
                    },
                    "Prediction service unavailable. Showing an estimated risk.",
                )
            }
        }
    }

    fn normalize(&self, request: &PredictionRequest, payload: &Value) -> CanonicalResult {
        let threshold = self.risk.positive_threshold;
        let parsed = parse::parse(payload);
        match parsed.signal {
            RiskSignal::Found(percent) => {
                // A conflicting backend label is surfaced, never substituted.
                if let Some(hint) = parsed.label_hint {
                    let derived = Classification::from_percent(percent, threshold);
                    if hint != derived {
                        warn!(
                            percent,
                            backend_label = hint.as_str(),
                            "backend label disagrees with threshold; keeping threshold"
                        );
                    }
                }
                CanonicalResult::from_percent(percent, threshold, ResultSource::Backend)
            }
            RiskSignal::NotFound => match self.heuristic.and_then(|hook| hook(request)) {
                Some(percent) => {
                    CanonicalResult::from_percent(percent, threshold, ResultSource::Heuristic)
                }
                None => self.fallback_result(),
            },
        }
    }

    fn fallback_result(&self) -> CanonicalResult {
        CanonicalResult::from_percent(
            self.fallback.generate(),
            self.risk.positive_threshold,
            ResultSource::Fallback,
        )
    }

    fn state(
        &self,
        request: PredictionRequest,
        result: CanonicalResult,
        backend: BackendAudit,
        toast: &str,
    ) -> SessionState {
        SessionState {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            request,
            result,
            backend,
            toast: toast.to_string(),
        }
    }
}
