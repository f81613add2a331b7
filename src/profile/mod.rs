//! Local identity echo: a small JSON-file put/get used for greeting and
//! display only, plus the read-only patient-lookup collaborator. Never an
//! input to risk logic.

use crate::config::PredictApiConfig;
use crate::predict::{diagnostic_detail, lenient_json, TransportError};
use crate::request::{coerce_int, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub phone: String,
}

impl PatientProfile {
    /// Build from raw form strings; every field is required.
    pub fn from_form(
        name: &str,
        gender: &str,
        age: &str,
        phone: &str,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if gender.trim().is_empty() {
            return Err(ValidationError::MissingField("gender"));
        }
        if age.trim().is_empty() {
            return Err(ValidationError::MissingField("age"));
        }
        if phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            gender: gender.trim().to_string(),
            age: coerce_int(age),
            phone: phone.trim().to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile io: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Single-slot key-value store backed by one JSON file.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn put(&self, profile: &PatientProfile) -> Result<(), ProfileError> {
        let data = serde_json::to_string_pretty(profile)?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    /// Missing file or unreadable content is simply no profile.
    pub fn get(&self) -> Result<Option<PatientProfile>, ProfileError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data).ok())
    }
}

/// Registration failed either against the backend or while echoing locally.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Store(#[from] ProfileError),
}

#[allow(async_fn_in_trait)]
pub trait PatientDirectory {
    /// Resolve a name/phone pair to a known patient, if any.
    async fn find(&self, name: &str, phone: &str)
        -> Result<Option<PatientProfile>, TransportError>;

    /// Register a new patient; a rejection carries the backend's field detail
    /// and is recoverable by user correction on the entry screen.
    async fn register(&self, profile: &PatientProfile)
        -> Result<PatientProfile, TransportError>;
}

/// Register with the backend, then echo the accepted record locally so later
/// screens can greet without another lookup.
pub async fn register_and_store<D: PatientDirectory>(
    directory: &D,
    store: &ProfileStore,
    profile: &PatientProfile,
) -> Result<PatientProfile, RegistrationError> {
    let accepted = directory.register(profile).await?;
    store.put(&accepted)?;
    Ok(accepted)
}

pub struct HttpPatientDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPatientDirectory {
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

impl PatientDirectory for HttpPatientDirectory {
    async fn find(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Option<PatientProfile>, TransportError> {
        let url = format!("{}/get-patient/", self.base_url);
        let res = self
            .client
            .get(&url)
            .query(&[("name", name.trim()), ("phone", phone.trim())])
            .send()
            .await?;
        if !res.status().is_success() {
            warn!(status = res.status().as_u16(), "patient lookup rejected");
            return Ok(None);
        }
        let raw = res.text().await.unwrap_or_default();
        let body = lenient_json(&raw);
        let found = body
            .get("message")
            .and_then(Value::as_str)
            .is_some_and(|m| m.eq_ignore_ascii_case("Login successfully"));
        if !found {
            return Ok(None);
        }
        // Prefer the echoed record; fall back to the queried identity.
        let profile = body
            .get("user")
            .and_then(|user| serde_json::from_value(user.clone()).ok())
            .unwrap_or_else(|| PatientProfile {
                name: name.trim().to_string(),
                gender: String::new(),
                age: 0,
                phone: phone.trim().to_string(),
            });
        Ok(Some(profile))
    }

    async fn register(
        &self,
        profile: &PatientProfile,
    ) -> Result<PatientProfile, TransportError> {
        let url = format!("{}/create/", self.base_url);
        let res = self.client.post(&url).json(profile).send().await?;
        let status = res.status();
        let raw = res.text().await.unwrap_or_default();
        let body = lenient_json(&raw);
        if !status.is_success() {
            let detail = diagnostic_detail(&body, &raw, status.as_u16());
            warn!(status = status.as_u16(), detail = %detail, "patient registration rejected");
            return Err(TransportError::Rejected(detail));
        }
        // Prefer the echoed record; fall back to what was submitted.
        Ok(body
            .get("user")
            .and_then(|user| serde_json::from_value(user.clone()).ok())
            .unwrap_or_else(|| profile.clone()))
    }
}
