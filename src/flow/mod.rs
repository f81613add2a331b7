//! One-shot state handoff between screens and the results-screen contract.
//! The carried state has no storage of its own; reaching the results screen
//! without it is a routing condition, answered with a redirect, not an error.

use crate::config::RiskConfig;
use crate::history::HistoryCollaborator;
use crate::parse::RiskSignal;
use crate::risk::Classification;
use crate::session::SessionState;
use std::time::Duration;
use tracing::{debug, warn};

/// Screen identities used for redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Entry,
    Dashboard,
    Predictor,
    Symptoms,
    Results,
}

/// One-shot carrier: the origin delivers, the destination takes exactly once.
#[derive(Debug, Default)]
pub struct Handoff {
    slot: Option<SessionState>,
}

impl Handoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliver(&mut self, state: SessionState) {
        if self.slot.is_some() {
            debug!("handoff replaced an unconsumed state");
        }
        self.slot = Some(state);
    }

    /// Deliver after the toast window, matching the submit acknowledgment delay.
    pub async fn deliver_after(&mut self, state: SessionState, delay: Duration) {
        tokio::time::sleep(delay).await;
        self.deliver(state);
    }

    /// Consumes the carried state; a second take yields None.
    pub fn take(&mut self) -> Option<SessionState> {
        self.slot.take()
    }
}

/// What the results screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub risk_percent: u8,
    pub classification: Classification,
    pub headline: String,
    pub advisory: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    Render(RenderedResult),
    Redirect(Screen),
}

pub struct ResultsScreen {
    threshold: u8,
}

impl ResultsScreen {
    pub fn new(risk: &RiskConfig) -> Self {
        Self {
            threshold: risk.positive_threshold,
        }
    }

    /// Absent or already-consumed state redirects to the entry screen
    /// without rendering anything.
    pub fn receive(&self, state: Option<SessionState>) -> ScreenOutcome {
        match state {
            None => ScreenOutcome::Redirect(Screen::Entry),
            Some(state) => ScreenOutcome::Render(render(
                state.result.risk_percent,
                state.result.classification,
            )),
        }
    }

    /// Best-effort overwrite from the most recent stored record. Fetch errors,
    /// empty results, and records without a usable percent leave the rendered
    /// state unchanged. Classification is re-derived from the fetched percent;
    /// the record's own label is diagnostic only.
    pub async fn refresh<H: HistoryCollaborator>(
        &self,
        current: RenderedResult,
        history: &H,
    ) -> RenderedResult {
        let records = match history.recent().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "history refresh failed; keeping rendered state");
                return current;
            }
        };
        let Some(first) = records.into_iter().next() else {
            return current;
        };
        let parsed = first.parsed();
        let RiskSignal::Found(percent) = parsed.signal else {
            return current;
        };
        let classification = Classification::from_percent(percent, self.threshold);
        if let Some(label) = parsed.label_hint {
            if label != classification {
                warn!(
                    percent,
                    stored_label = label.as_str(),
                    "stored label disagrees with threshold; keeping threshold"
                );
            }
        }
        render(percent, classification)
    }
}

fn render(percent: u8, classification: Classification) -> RenderedResult {
    let advisory = if classification.is_positive() {
        "High risk detected. Please consult a doctor for further evaluation."
    } else {
        "Low risk. No immediate consultation required."
    };
    RenderedResult {
        risk_percent: percent,
        classification,
        headline: classification.as_str().to_string(),
        advisory: advisory.to_string(),
    }
}
