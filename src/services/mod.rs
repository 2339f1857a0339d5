pub mod breach_check;
pub mod http_client;
pub mod link_reputation;
pub mod scam_classifier;

use crate::config::ServicesConfig;
use crate::error::{ConfigError, ServiceError};
use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use breach_check::{BreachResponse, HttpBreachLookup};
pub use http_client::ServiceClient;
pub use link_reputation::{HttpLinkReputation, LinkReputationResponse};
pub use scam_classifier::{ClassifierResponse, HttpScamClassifier};

#[async_trait]
pub trait ScamClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassifierResponse, ServiceError>;
}

#[async_trait]
pub trait BreachLookup: Send + Sync {
    async fn check(&self, emails: &[String]) -> Result<BreachResponse, ServiceError>;
}

#[async_trait]
pub trait LinkReputation: Send + Sync {
    async fn analyze_links(
        &self,
        text: &str,
        urls: &[String],
    ) -> Result<LinkReputationResponse, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    ScamClassifier,
    BreachCheck,
    LinkReputation,
}

impl ServiceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::ScamClassifier => "Scam Text Classifier",
            ServiceKind::BreachCheck => "Breach Check",
            ServiceKind::LinkReputation => "Link Analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Error,
    /// The call was never issued.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServicePayload {
    Classifier(ClassifierResponse),
    Breach(BreachResponse),
    LinkReputation(LinkReputationResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCallResult {
    pub service: ServiceKind,
    pub status: ServiceStatus,
    pub payload: Option<ServicePayload>,
    /// Failure diagnostic, or the reason a call was skipped.
    pub error_detail: Option<String>,
}

impl ServiceCallResult {
    pub fn ok(service: ServiceKind, payload: ServicePayload) -> Self {
        Self {
            service,
            status: ServiceStatus::Ok,
            payload: Some(payload),
            error_detail: None,
        }
    }

    pub fn error(service: ServiceKind, error: &ServiceError) -> Self {
        Self {
            service,
            status: ServiceStatus::Error,
            payload: None,
            error_detail: Some(format!("{}: {}", service.display_name(), error)),
        }
    }

    pub fn skipped(service: ServiceKind, reason: &str) -> Self {
        Self {
            service,
            status: ServiceStatus::Skipped,
            payload: None,
            error_detail: Some(reason.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ServiceStatus::Ok
    }

    fn from_outcome(service: ServiceKind, outcome: Result<ServicePayload, ServiceError>) -> Self {
        match outcome {
            Ok(payload) => {
                log::debug!("{} returned usable data", service.display_name());
                Self::ok(service, payload)
            }
            Err(e) => {
                log::warn!("{} unavailable: {}", service.display_name(), e);
                Self::error(service, &e)
            }
        }
    }
}

/// Fans out to the remote classifiers and waits for all of them.
pub struct ServiceOrchestrator {
    classifier: Option<Arc<dyn ScamClassifier>>,
    breach: Option<Arc<dyn BreachLookup>>,
    links: Option<Arc<dyn LinkReputation>>,
    timeout: Duration,
}

impl ServiceOrchestrator {
    pub fn new(
        classifier: Option<Arc<dyn ScamClassifier>>,
        breach: Option<Arc<dyn BreachLookup>>,
        links: Option<Arc<dyn LinkReputation>>,
        timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            breach,
            links,
            timeout,
        }
    }

    /// Every service recorded as skipped; no network traffic.
    pub fn offline() -> Self {
        Self::new(None, None, None, Duration::from_secs(1))
    }

    pub fn from_config(config: &ServicesConfig) -> Result<Self, ConfigError> {
        if config.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = |path: &str| {
            ServiceClient::new(&config.base_url, path, timeout, &config.user_agent)
        };

        let classifier: Option<Arc<dyn ScamClassifier>> = if config.scam_classifier.enabled {
            Some(Arc::new(HttpScamClassifier::new(client(
                &config.scam_classifier.path,
            )?)))
        } else {
            None
        };
        let breach: Option<Arc<dyn BreachLookup>> = if config.breach_check.enabled {
            Some(Arc::new(HttpBreachLookup::new(client(
                &config.breach_check.path,
            )?)))
        } else {
            None
        };
        let links: Option<Arc<dyn LinkReputation>> = if config.link_reputation.enabled {
            Some(Arc::new(HttpLinkReputation::new(client(
                &config.link_reputation.path,
            )?)))
        } else {
            None
        };

        Ok(Self::new(classifier, breach, links, timeout))
    }

    /// Never fails: each call is isolated and downgraded to `Error` on any
    /// problem, including a timeout of that call alone.
    pub async fn call_services(
        &self,
        text: &str,
        urls: &[String],
        emails: &[String],
    ) -> Vec<ServiceCallResult> {
        let classifier = async {
            let kind = ServiceKind::ScamClassifier;
            match &self.classifier {
                None => ServiceCallResult::skipped(kind, "disabled by configuration"),
                Some(service) => {
                    let outcome = self
                        .bounded(service.classify(text))
                        .await
                        .and_then(ClassifierResponse::validate)
                        .map(ServicePayload::Classifier);
                    ServiceCallResult::from_outcome(kind, outcome)
                }
            }
        };

        let breach = async {
            let kind = ServiceKind::BreachCheck;
            match &self.breach {
                _ if emails.is_empty() => ServiceCallResult::skipped(kind, "no email addresses found"),
                None => ServiceCallResult::skipped(kind, "disabled by configuration"),
                Some(service) => {
                    let outcome = self
                        .bounded(service.check(emails))
                        .await
                        .and_then(BreachResponse::validate)
                        .map(|r| ServicePayload::Breach(r.retain_requested(emails)));
                    ServiceCallResult::from_outcome(kind, outcome)
                }
            }
        };

        let links = async {
            let kind = ServiceKind::LinkReputation;
            match &self.links {
                _ if urls.is_empty() => ServiceCallResult::skipped(kind, "no URLs found"),
                None => ServiceCallResult::skipped(kind, "disabled by configuration"),
                Some(service) => {
                    let outcome = self
                        .bounded(service.analyze_links(text, urls))
                        .await
                        .and_then(LinkReputationResponse::validate)
                        .map(ServicePayload::LinkReputation);
                    ServiceCallResult::from_outcome(kind, outcome)
                }
            }
        };

        let (classifier, breach, links) = tokio::join!(classifier, breach, links);
        vec![classifier, breach, links]
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.timeout)),
        }
    }
}
