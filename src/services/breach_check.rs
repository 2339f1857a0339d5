use super::http_client::ServiceClient;
use super::BreachLookup;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreachResponse {
    #[serde(default)]
    pub breached_emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BreachResponse {
    pub fn validate(self) -> Result<Self, ServiceError> {
        match self.error {
            Some(error) => Err(ServiceError::Upstream(error)),
            None => Ok(self),
        }
    }

    /// Keep only identities that were actually asked about, once each.
    pub fn retain_requested(mut self, requested: &[String]) -> Self {
        let requested: HashSet<String> = requested.iter().map(|e| e.to_lowercase()).collect();
        let mut seen = HashSet::new();
        self.breached_emails.retain(|email| {
            let email = email.to_lowercase();
            requested.contains(&email) && seen.insert(email)
        });
        self
    }

    pub fn compromised_count(&self) -> usize {
        self.breached_emails.len()
    }
}

#[derive(Debug, Serialize)]
struct BreachRequest<'a> {
    emails: &'a [String],
}

pub struct HttpBreachLookup {
    client: ServiceClient,
}

impl HttpBreachLookup {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BreachLookup for HttpBreachLookup {
    async fn check(&self, emails: &[String]) -> Result<BreachResponse, ServiceError> {
        self.client.post_json(&BreachRequest { emails }).await
    }
}
