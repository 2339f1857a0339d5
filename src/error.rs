use std::time::Duration;

/// Failure surfaced to callers of `ScamAnalyzer::analyze`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No content to analyze")]
    EmptyInput,
}

/// Failure of a single remote service call. Never escapes the orchestrator;
/// it is rendered into `ServiceCallResult::error_detail`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP error {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Schema violation: {0}")]
    Schema(String),
    #[error("Service reported error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            // reqwest does not expose the configured deadline on the error
            ServiceError::Transport(format!("request timed out: {e}"))
        } else if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ServiceError::Status(status.as_u16())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Indicator category at position {0} has no name")]
    UnnamedCategory(usize),
    #[error("Indicator category '{0}' must award more than zero points per match")]
    ZeroPoints(String),
    #[error("Indicator category '{0}' has no patterns")]
    EmptyCategory(String),
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Tier thresholds must be strictly decreasing (high > medium > low_medium > 0)")]
    ThresholdOrder,
    #[error("Invalid service base URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("Service timeout must be at least one second")]
    ZeroTimeout,
}
