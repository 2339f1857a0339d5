use crate::aggregate::Aggregator;
use crate::config::Config;
use crate::error::{AnalysisError, ConfigError};
use crate::extraction::EntityExtractor;
use crate::features::FeatureEngine;
use crate::recommendations::recommend;
use crate::report::{ReportFormatter, StructuredReport};
use crate::services::ServiceOrchestrator;
use std::sync::Arc;
use std::time::Instant;

/// Scores one message end to end. Holds no per-message state, so a single
/// instance can serve concurrent analyses.
pub struct ScamAnalyzer {
    config: Arc<Config>,
    extractor: EntityExtractor,
    features: FeatureEngine,
    services: ServiceOrchestrator,
    aggregator: Aggregator,
}

impl ScamAnalyzer {
    /// Build with HTTP clients for every enabled remote service.
    pub fn new(config: Arc<Config>) -> Result<Self, ConfigError> {
        let services = ServiceOrchestrator::from_config(&config.services)?;
        Self::with_services(config, services)
    }

    pub fn with_services(
        config: Arc<Config>,
        services: ServiceOrchestrator,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            extractor: EntityExtractor::new(),
            features: FeatureEngine::from_config(&config)?,
            aggregator: Aggregator::from_config(&config.scoring)?,
            services,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn analyze(&self, raw_text: &str) -> Result<StructuredReport, AnalysisError> {
        if raw_text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let started = Instant::now();

        let entities = self.extractor.extract(raw_text);
        log::debug!(
            "Extracted {} URL(s) and {} email(s)",
            entities.urls.len(),
            entities.emails.len()
        );

        let local = self
            .features
            .analyze_locally(raw_text, &entities.urls, &entities.emails);

        let results = self
            .services
            .call_services(raw_text, &entities.urls, &entities.emails)
            .await;

        let mut aggregate = self.aggregator.aggregate(&local, &results);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        aggregate.analysis_duration_ms = elapsed_ms;

        let recommendations = recommend(
            aggregate.risk_tier,
            &aggregate.indicators,
            &entities.urls,
            &entities.emails,
        );

        log::info!(
            "Analysis complete: {} (score {:.1}, {}/{} services available) in {}ms",
            aggregate.risk_tier,
            aggregate.total_score,
            aggregate.available_service_count(),
            aggregate.services_used.len(),
            elapsed_ms
        );

        Ok(ReportFormatter::format(
            &aggregate,
            recommendations,
            elapsed_ms,
            &entities,
        ))
    }
}
