//! Session orchestration: short-circuit, normalization round trips, failure
//! continuity, and the results refresh path, all against mock collaborators.

use diarisk::config::{FallbackConfig, RiskConfig};
use diarisk::fallback::FallbackGenerator;
use diarisk::flow::{Handoff, ResultsScreen};
use diarisk::history::{HistoryCollaborator, HistoryRecord};
use diarisk::predict::{PredictCollaborator, PredictOutcome, TransportError};
use diarisk::request::{PimaForm, PredictionRequest, SymptomsForm, YesNo};
use diarisk::risk::{Classification, ResultSource};
use diarisk::session::{BackendAudit, PredictionSession, SessionState};
use serde_json::{json, Value};
use std::time::Duration;

fn in_fallback_bands(percent: u8) -> bool {
    (5..=46).contains(&percent) || (55..=95).contains(&percent)
}

fn session_with<C: PredictCollaborator>(collaborator: C) -> PredictionSession<C> {
    PredictionSession::new(
        collaborator,
        FallbackGenerator::seeded(FallbackConfig::default(), 7),
        RiskConfig::default(),
    )
}

fn nonzero_pima() -> PredictionRequest {
    let mut form = PimaForm::default();
    form.glucose = "148".to_string();
    form.age = "47".to_string();
    PredictionRequest::Pima(form.build())
}

fn assert_invariant(state: &SessionState) {
    assert_eq!(
        state.result.classification,
        Classification::from_percent(state.result.risk_percent, 50)
    );
}

/// Collaborator that returns a scripted outcome.
struct Scripted(Value);

impl PredictCollaborator for Scripted {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError> {
        Ok(PredictOutcome::Success(self.0.clone()))
    }
}

/// Collaborator that rejects with a serializer-style body.
struct Rejecting;

impl PredictCollaborator for Rejecting {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError> {
        Ok(PredictOutcome::Failure {
            status: 400,
            body: json!({"Glucose": ["This field is required."]}),
            raw: String::new(),
        })
    }
}

/// Collaborator that simulates a network outage.
struct Unreachable;

impl PredictCollaborator for Unreachable {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError> {
        Err(TransportError::Connection("simulated outage".to_string()))
    }
}

/// Collaborator that must never be reached.
struct MustNotCall;

impl PredictCollaborator for MustNotCall {
    async fn predict(
        &self,
        _request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError> {
        panic!("network I/O attempted for a degenerate request");
    }
}

#[tokio::test]
async fn all_zero_request_skips_network_and_falls_back() {
    let session = session_with(MustNotCall);
    let state = session
        .submit(PredictionRequest::Pima(PimaForm::default().build()))
        .await;
    assert!(in_fallback_bands(state.result.risk_percent));
    assert_eq!(state.result.source, ResultSource::Fallback);
    assert!(matches!(state.backend, BackendAudit::SkippedDegenerate));
    assert_invariant(&state);
}

#[tokio::test]
async fn numeric_risk_round_trip() {
    let session = session_with(Scripted(json!({"risk": 73})));
    let state = session.submit(nonzero_pima()).await;
    assert_eq!(state.result.risk_percent, 73);
    assert_eq!(state.result.classification, Classification::Positive);
    assert_eq!(state.result.source, ResultSource::Backend);
    assert!(matches!(state.backend, BackendAudit::Response { .. }));
}

#[tokio::test]
async fn probability_round_trip() {
    let session = session_with(Scripted(json!({"probability": 0.2})));
    let state = session.submit(nonzero_pima()).await;
    assert_eq!(state.result.risk_percent, 20);
    assert_eq!(state.result.classification, Classification::Negative);
}

#[tokio::test]
async fn percent_string_round_trip() {
    let session = session_with(Scripted(json!({"risk_level": "61%"})));
    let state = session.submit(nonzero_pima()).await;
    assert_eq!(state.result.risk_percent, 61);
    assert_eq!(state.result.classification, Classification::Positive);
}

#[tokio::test]
async fn conflicting_backend_label_never_overrides_threshold() {
    let session = session_with(Scripted(json!({"risk": 30, "result": "Positive"})));
    let state = session.submit(nonzero_pima()).await;
    assert_eq!(state.result.risk_percent, 30);
    assert_eq!(state.result.classification, Classification::Negative);
    assert_invariant(&state);
}

#[tokio::test]
async fn no_signal_falls_back_with_payload_kept_for_audit() {
    let session = session_with(Scripted(json!({"message": "queued"})));
    let state = session.submit(nonzero_pima()).await;
    assert!(in_fallback_bands(state.result.risk_percent));
    assert_eq!(state.result.source, ResultSource::Fallback);
    match &state.backend {
        BackendAudit::Response { payload } => assert_eq!(payload["message"], json!("queued")),
        other => panic!("expected response audit, got {:?}", other),
    }
}

#[tokio::test]
async fn no_signal_uses_heuristic_hook_for_symptoms() {
    let mut form = SymptomsForm::default();
    form.age = "50".to_string();
    form.gender = "male".to_string();
    form.answers.polyuria = YesNo::Yes;
    form.answers.polydipsia = YesNo::Yes;
    form.answers.weakness = YesNo::Yes;
    form.answers.polyphagia = YesNo::Yes;
    form.answers.itching = YesNo::Yes;
    form.answers.irritability = YesNo::Yes;
    form.answers.obesity = YesNo::Yes;
    let request = PredictionRequest::Symptoms(form.build().unwrap());

    let session = session_with(Scripted(json!({"message": "ok"})))
        .with_heuristic(PredictionRequest::heuristic_score);
    let state = session.submit(request).await;
    assert_eq!(state.result.risk_percent, 55);
    assert_eq!(state.result.source, ResultSource::Heuristic);
    assert_invariant(&state);
}

#[tokio::test]
async fn rejection_routes_to_fallback_with_detail() {
    let session = session_with(Rejecting);
    let state = session.submit(nonzero_pima()).await;
    assert!(in_fallback_bands(state.result.risk_percent));
    match &state.backend {
        BackendAudit::Error { detail } => {
            assert_eq!(detail, "Glucose: This field is required.");
        }
        other => panic!("expected error audit, got {:?}", other),
    }
    assert_invariant(&state);
}

#[tokio::test]
async fn transport_failure_always_resolves_in_bands() {
    let session = session_with(Unreachable);
    let state = session.submit(nonzero_pima()).await;
    assert!(in_fallback_bands(state.result.risk_percent));
    assert_eq!(state.result.source, ResultSource::Fallback);
    assert!(matches!(state.backend, BackendAudit::Error { .. }));
    assert_invariant(&state);
}

struct FixedHistory(Vec<HistoryRecord>);

impl HistoryCollaborator for FixedHistory {
    async fn recent(&self) -> Result<Vec<HistoryRecord>, TransportError> {
        Ok(self.0.clone())
    }
}

struct BrokenHistory;

impl HistoryCollaborator for BrokenHistory {
    async fn recent(&self) -> Result<Vec<HistoryRecord>, TransportError> {
        Err(TransportError::Connection("history down".to_string()))
    }
}

fn sample_state(percent: u8) -> SessionState {
    let mut form = PimaForm::default();
    form.glucose = "1".to_string();
    SessionState {
        id: "test".to_string(),
        created_at: chrono::Utc::now(),
        request: PredictionRequest::Pima(form.build()),
        result: diarisk::risk::CanonicalResult::from_percent(percent, 50, ResultSource::Backend),
        backend: BackendAudit::SkippedDegenerate,
        toast: String::new(),
    }
}

fn rendered_from(percent: u8) -> diarisk::flow::RenderedResult {
    let screen = ResultsScreen::new(&RiskConfig::default());
    match screen.receive(Some(sample_state(percent))) {
        diarisk::flow::ScreenOutcome::Render(rendered) => rendered,
        other => panic!("expected render, got {:?}", other),
    }
}

#[tokio::test]
async fn refresh_overwrites_from_first_record_and_rederives_label() {
    let screen = ResultsScreen::new(&RiskConfig::default());
    let current = rendered_from(20);
    // Stored label says Negative but 80% must classify Positive.
    let history = FixedHistory(vec![
        HistoryRecord(json!({"risk": 80, "result": "Negative"})),
        HistoryRecord(json!({"risk": 5})),
    ]);
    let refreshed = screen.refresh(current, &history).await;
    assert_eq!(refreshed.risk_percent, 80);
    assert_eq!(refreshed.classification, Classification::Positive);
}

#[tokio::test]
async fn refresh_ignores_empty_malformed_and_failed_fetches() {
    let screen = ResultsScreen::new(&RiskConfig::default());

    let current = rendered_from(33);
    let unchanged = screen.refresh(current.clone(), &FixedHistory(Vec::new())).await;
    assert_eq!(unchanged, current);

    let malformed = FixedHistory(vec![HistoryRecord(json!({"note": "no percent here"}))]);
    let unchanged = screen.refresh(current.clone(), &malformed).await;
    assert_eq!(unchanged, current);

    let unchanged = screen.refresh(current.clone(), &BrokenHistory).await;
    assert_eq!(unchanged, current);
}

#[tokio::test(start_paused = true)]
async fn handoff_waits_for_the_acknowledgment_window() {
    let mut handoff = Handoff::new();
    let state = sample_state(60);

    // One millisecond short of the window: nothing may be takeable yet.
    let early = tokio::time::timeout(
        Duration::from_millis(899),
        handoff.deliver_after(state.clone(), Duration::from_millis(900)),
    )
    .await;
    assert!(early.is_err(), "state handed off before the toast window elapsed");
    assert!(handoff.take().is_none());

    // The full window elapses: delivery completes and the state is takeable once.
    tokio::time::timeout(
        Duration::from_millis(901),
        handoff.deliver_after(state, Duration::from_millis(900)),
    )
    .await
    .expect("delivery within the configured delay");
    assert!(handoff.take().is_some());
    assert!(handoff.take().is_none());
}

#[tokio::test]
async fn rendered_advisory_tracks_classification() {
    let positive = rendered_from(82);
    assert_eq!(positive.headline, "Positive");
    assert!(positive.advisory.contains("consult a doctor"));

    let negative = rendered_from(12);
    assert_eq!(negative.headline, "Negative");
    assert!(negative.advisory.contains("Low risk"));
}
