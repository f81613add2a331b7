//! Prediction backend client: one POST per submit. The body is read as text
//! first so malformed JSON and non-2xx responses still yield diagnostics.

use crate::config::PredictApiConfig;
use crate::request::PredictionRequest;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("connection failed: {0}")]
    Connection(String),
    /// Non-2xx where the caller surfaces the joined rejection detail
    #[error("{0}")]
    Rejected(String),
}

/// Outcome of a predict call that produced an HTTP response.
#[derive(Debug, Clone)]
pub enum PredictOutcome {
    /// 2xx; body parsed leniently (Null when empty or malformed)
    Success(Value),
    /// Non-2xx; body retained for diagnostic detail
    Failure { status: u16, body: Value, raw: String },
}

/// The opaque prediction endpoint. Implementations must not interpret the
/// response shape; normalization happens in [`crate::parse`].
#[allow(async_fn_in_trait)]
pub trait PredictCollaborator {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError>;
}

pub struct HttpPredictClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictClient {
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

impl PredictCollaborator for HttpPredictClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictOutcome, TransportError> {
        let url = format!("{}/predict/", self.base_url);
        let res = self.client.post(&url).json(request).send().await?;
        let status = res.status();
        let raw = res.text().await.unwrap_or_default();
        let body = lenient_json(&raw);
        if status.is_success() {
            Ok(PredictOutcome::Success(body))
        } else {
            warn!(status = status.as_u16(), "predict returned non-success status");
            Ok(PredictOutcome::Failure {
                status: status.as_u16(),
                body,
                raw,
            })
        }
    }
}

/// Parse a body that may be empty or not JSON at all.
pub fn lenient_json(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or(Value::Null)
}

/// Join rejection-body fields as `key: value | key: value` for user-facing
/// detail; falls back to the raw text, then to a generic status message.
pub fn diagnostic_detail(body: &Value, raw: &str, status: u16) -> String {
    if let Value::Object(map) = body {
        if !map.is_empty() {
            return map
                .iter()
                .map(|(k, v)| format!("{}: {}", k, flatten_value(v)))
                .collect::<Vec<_>>()
                .join(" | ");
        }
    }
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("Request failed ({})", status)
    }
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
