//! Read-only most-recent-record collaborator for the results refresh path.
//! Entirely best-effort: malformed or empty responses are ignored.

use crate::config::PredictApiConfig;
use crate::parse::{self, ParsedResponse, RiskSignal};
use crate::predict::{lenient_json, TransportError};
use crate::risk::Classification;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// A stored prediction record as the backend reports it. Shape varies, so it
/// is kept opaque and re-run through the same extraction as live responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecord(pub Value);

impl HistoryRecord {
    /// One extraction pass over the payload; both accessors derive from this.
    pub fn parsed(&self) -> ParsedResponse {
        parse::parse(&self.0)
    }

    /// Usable percent, if the record carries one in any known convention.
    pub fn risk_percent(&self) -> Option<u8> {
        match self.parsed().signal {
            RiskSignal::Found(percent) => Some(percent),
            RiskSignal::NotFound => None,
        }
    }

    pub fn label_hint(&self) -> Option<Classification> {
        self.parsed().label_hint
    }
}

#[allow(async_fn_in_trait)]
pub trait HistoryCollaborator {
    /// Most recent record first. An empty vec means nothing usable.
    async fn recent(&self) -> Result<Vec<HistoryRecord>, TransportError>;
}

pub struct HttpHistoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpHistoryClient {
    pub fn new(config: &PredictApiConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl HistoryCollaborator for HttpHistoryClient {
    async fn recent(&self) -> Result<Vec<HistoryRecord>, TransportError> {
        let url = format!("{}/history/", self.base_url);
        let res = self.client.get(&url).send().await?;
        if !res.status().is_success() {
            return Ok(Vec::new());
        }
        let raw = res.text().await.unwrap_or_default();
        Ok(records_from(lenient_json(&raw)))
    }
}

/// Accepts a bare array or an object wrapping one under `records`/`results`.
fn records_from(body: Value) -> Vec<HistoryRecord> {
    match body {
        Value::Array(items) => items.into_iter().map(HistoryRecord).collect(),
        Value::Object(mut map) => {
            for key in ["records", "results"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items.into_iter().map(HistoryRecord).collect();
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
