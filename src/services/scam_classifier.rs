use super::http_client::ServiceClient;
use super::ScamClassifier;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResponse {
    /// Scam likelihood as a fraction in `[0, 1]`.
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassifierResponse {
    pub fn validate(self) -> Result<Self, ServiceError> {
        if let Some(error) = self.error {
            return Err(ServiceError::Upstream(error));
        }
        match self.risk_score {
            None => Err(ServiceError::Schema("missing risk_score".to_string())),
            Some(score) if !score.is_finite() || !(0.0..=1.0).contains(&score) => Err(
                ServiceError::Schema(format!("risk_score {score} outside [0, 1]")),
            ),
            Some(_) => Ok(self),
        }
    }

    pub fn risk_fraction(&self) -> f64 {
        self.risk_score.unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize)]
struct ClassifierRequest<'a> {
    text: &'a str,
}

pub struct HttpScamClassifier {
    client: ServiceClient,
}

impl HttpScamClassifier {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScamClassifier for HttpScamClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifierResponse, ServiceError> {
        self.client.post_json(&ClassifierRequest { text }).await
    }
}
