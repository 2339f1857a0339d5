use super::http_client::ServiceClient;
use super::LinkReputation;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkReputationResponse {
    #[serde(default, alias = "result")]
    pub analysis: LinkAnalysisBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkAnalysisBody {
    #[serde(default)]
    pub urls: Vec<UrlVerdict>,
    /// Mean per-URL risk. Each URL sums several sub-scores, so values above
    /// 100 are legitimate.
    #[serde(default)]
    pub average_risk_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlVerdict {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub indicators: Vec<String>,
}

impl LinkReputationResponse {
    pub fn validate(self) -> Result<Self, ServiceError> {
        if let Some(error) = self.error {
            return Err(ServiceError::Upstream(error));
        }
        if let Some(score) = self.analysis.average_risk_score {
            if !score.is_finite() || score < 0.0 {
                return Err(ServiceError::Schema(format!(
                    "average_risk_score {score} is not a non-negative number"
                )));
            }
        }
        Ok(self)
    }

    pub fn average_risk_score(&self) -> f64 {
        self.analysis.average_risk_score.unwrap_or(0.0)
    }

    /// Per-URL indicators, flattened in the order the service listed them.
    pub fn indicators(&self) -> impl Iterator<Item = &String> {
        self.analysis.urls.iter().flat_map(|u| u.indicators.iter())
    }
}

#[derive(Debug, Serialize)]
struct LinkRequest<'a> {
    text: &'a str,
    urls: &'a [String],
}

pub struct HttpLinkReputation {
    client: ServiceClient,
}

impl HttpLinkReputation {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkReputation for HttpLinkReputation {
    async fn analyze_links(
        &self,
        text: &str,
        urls: &[String],
    ) -> Result<LinkReputationResponse, ServiceError> {
        self.client.post_json(&LinkRequest { text, urls }).await
    }
}
