use crate::error::{ConfigError, ServiceError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// JSON-over-HTTP endpoint shared by the remote classifiers.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    endpoint: Url,
}

impl ServiceClient {
    pub fn new(
        base_url: &str,
        path: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(path))
            .map_err(|_| ConfigError::InvalidBaseUrl(format!("{base_url}{path}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client, using defaults: {e}");
                Client::new()
            });

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `body` as JSON and decode a JSON reply. Non-2xx is an error even
    /// when the body would decode.
    pub async fn post_json<B, T>(&self, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let client = ServiceClient::new(
            "https://api.example.com",
            "/api/scam/comprehensive",
            Duration::from_secs(5),
            "test",
        )
        .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.example.com/api/scam/comprehensive"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ServiceClient::new("not a url", "/x", Duration::from_secs(5), "test");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }
}
