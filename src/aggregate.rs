use crate::config::{compile_pattern, ScoringConfig, TierThresholds};
use crate::error::ConfigError;
use crate::features::LocalAnalysis;
use crate::services::{ServiceCallResult, ServicePayload};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    LowMedium,
    Medium,
    High,
}

impl RiskTier {
    /// Thresholds are checked from highest to lowest; the first one met wins.
    pub fn from_score(score: f64, thresholds: &TierThresholds) -> Self {
        match score {
            s if s >= thresholds.high => RiskTier::High,
            s if s >= thresholds.medium => RiskTier::Medium,
            s if s >= thresholds.low_medium => RiskTier::LowMedium,
            _ => RiskTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::LowMedium => "LOW_MEDIUM",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }

    pub fn is_scam(&self) -> bool {
        *self >= RiskTier::Medium
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceUsage {
    pub name: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Raw blended score; not clamped.
    pub total_score: f64,
    pub risk_tier: RiskTier,
    pub confidence: u8,
    /// Every user-facing indicator, technical noise removed.
    pub indicators: Vec<String>,
    /// Head of `indicators` for the summary view.
    pub summary_indicators: Vec<String>,
    pub suspicious_elements: Vec<String>,
    pub services_used: Vec<ServiceUsage>,
    /// Narrative returned by the scam-text classifier, if any.
    pub classifier_analysis: Option<String>,
    pub analysis_duration_ms: u64,
}

impl AggregateResult {
    pub fn available_service_count(&self) -> usize {
        self.services_used.iter().filter(|s| s.available).count()
    }
}

/// The local analyzer plus the three remote services.
const CONFIDENCE_SOURCES: f64 = 4.0;
const CONFIDENCE_PER_INDICATOR: f64 = 5.0;

pub struct Aggregator {
    thresholds: TierThresholds,
    breach_points: f64,
    technical_errors: Vec<Regex>,
    summary_limit: usize,
    suspicious_keywords: Vec<String>,
}

impl Aggregator {
    pub fn from_config(scoring: &ScoringConfig) -> Result<Self, ConfigError> {
        let technical_errors = scoring
            .technical_error_patterns
            .iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            thresholds: scoring.thresholds,
            breach_points: f64::from(scoring.breach_points),
            technical_errors,
            summary_limit: scoring.summary_limit,
            suspicious_keywords: scoring.suspicious_element_keywords.clone(),
        })
    }

    pub fn aggregate(&self, local: &LocalAnalysis, results: &[ServiceCallResult]) -> AggregateResult {
        let mut total_score = f64::from(local.score);
        let mut indicators: Vec<String> = local.indicators.clone();
        let mut classifier_analysis = None;

        for result in results {
            let Some(payload) = result.payload.as_ref().filter(|_| result.is_available()) else {
                continue;
            };
            match payload {
                ServicePayload::Classifier(response) => {
                    // 0-1 fraction onto the point scale, blended without normalization
                    total_score += response.risk_fraction() * 100.0;
                    indicators.extend(response.indicators.iter().cloned());
                    classifier_analysis = response.analysis.clone().filter(|a| !a.trim().is_empty());
                }
                ServicePayload::Breach(response) => {
                    let compromised = response.compromised_count();
                    if compromised > 0 {
                        total_score += self.breach_points;
                        indicators.push(format!("Compromised emails detected: {compromised}"));
                    }
                }
                ServicePayload::LinkReputation(response) => {
                    total_score += response.average_risk_score();
                    indicators.extend(response.indicators().cloned());
                }
            }
        }

        let total_score = total_score.max(0.0);
        let indicators: Vec<String> = indicators
            .into_iter()
            .filter(|i| !self.is_technical_error(i))
            .collect();

        let services_used: Vec<ServiceUsage> = results
            .iter()
            .map(|r| ServiceUsage {
                name: r.service.display_name().to_string(),
                available: r.is_available(),
            })
            .collect();

        let available_sources = 1 + services_used.iter().filter(|s| s.available).count();
        let confidence = (available_sources as f64 / CONFIDENCE_SOURCES * 100.0
            + indicators.len() as f64 * CONFIDENCE_PER_INDICATOR)
            .min(100.0)
            .round() as u8;

        let risk_tier = RiskTier::from_score(total_score, &self.thresholds);
        log::debug!(
            "Aggregated score {total_score:.1} -> {risk_tier} ({} indicators, confidence {confidence})",
            indicators.len()
        );

        AggregateResult {
            total_score,
            risk_tier,
            confidence,
            summary_indicators: indicators.iter().take(self.summary_limit).cloned().collect(),
            suspicious_elements: self.suspicious_elements(&indicators),
            indicators,
            services_used,
            classifier_analysis,
            analysis_duration_ms: 0,
        }
    }

    /// Upstream infrastructure failures that leak into indicator lists.
    pub fn is_technical_error(&self, indicator: &str) -> bool {
        self.technical_errors.iter().any(|r| r.is_match(indicator))
    }

    /// Keywords match case-sensitively.
    fn suspicious_elements(&self, indicators: &[String]) -> Vec<String> {
        indicators
            .iter()
            .filter(|i| self.suspicious_keywords.iter().any(|k| i.contains(k.as_str())))
            .cloned()
            .collect()
    }
}
