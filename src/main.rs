//! diarisk entrypoint: runs one submit-predict-handoff cycle against the
//! configured backend. With no request file given it submits the untouched
//! (all-zero) lab form, which short-circuits to an estimated risk.

use diarisk::{
    config::AppConfig,
    fallback::FallbackGenerator,
    flow::{Handoff, ResultsScreen, ScreenOutcome},
    predict::HttpPredictClient,
    request::{PimaForm, PredictionRequest},
    session::PredictionSession,
    logging::StructuredLogger,
};
use std::time::Duration;
use tracing::{info, warn};

fn load_request() -> PredictionRequest {
    if let Ok(path) = std::env::var("DIARISK_REQUEST_PATH") {
        if let Ok(data) = std::fs::read_to_string(&path) {
            match serde_json::from_str::<PredictionRequest>(&data) {
                Ok(request) => return request,
                Err(e) => warn!(path, error = %e, "request file unreadable; using demo form"),
            }
        }
    }
    PredictionRequest::Pima(PimaForm::default().build())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("DIARISK_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = AppConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(base_url = %config.api.base_url, "diarisk starting");

    let client = HttpPredictClient::new(&config.api)?;
    let session = PredictionSession::new(
        client,
        FallbackGenerator::new(config.fallback.clone()),
        config.risk.clone(),
    )
    .with_heuristic(PredictionRequest::heuristic_score);

    let request = load_request();
    let state = session.submit(request).await;
    info!(toast = %state.toast, session_id = %state.id, "submit acknowledged");

    let mut handoff = Handoff::new();
    handoff
        .deliver_after(state, Duration::from_millis(config.flow.handoff_delay_ms))
        .await;

    let screen = ResultsScreen::new(&config.risk);
    match screen.receive(handoff.take()) {
        ScreenOutcome::Render(rendered) => {
            info!(
                percent = rendered.risk_percent,
                classification = %rendered.headline,
                advisory = %rendered.advisory,
                "results rendered"
            );
        }
        ScreenOutcome::Redirect(screen) => {
            warn!(?screen, "no carried state; redirecting");
        }
    }

    Ok(())
}
