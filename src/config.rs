//! App configuration. Endpoint and thresholds come from a JSON file when present.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prediction backend endpoint and timeouts
    pub api: PredictApiConfig,
    /// Fallback band bounds
    pub fallback: FallbackConfig,
    /// Classification threshold
    pub risk: RiskConfig,
    /// Screen-flow timing
    pub flow: FlowConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictApiConfig {
    /// Base URL of the prediction backend (e.g. http://127.0.0.1:8000/api)
    pub base_url: String,
    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,
    /// Connect timeout (seconds)
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Low band, inclusive bounds
    pub low_min: u8,
    pub low_max: u8,
    /// High band, inclusive bounds
    pub high_min: u8,
    pub high_max: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Percent at or above this classifies Positive
    pub positive_threshold: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Delay between submit acknowledgment and handoff to the results screen (ms)
    pub handoff_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: PredictApiConfig::default(),
            fallback: FallbackConfig::default(),
            risk: RiskConfig::default(),
            flow: FlowConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for PredictApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            low_min: 5,
            low_max: 46,
            high_min: 55,
            high_max: 95,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 50,
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            handoff_delay_ms: 900,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
