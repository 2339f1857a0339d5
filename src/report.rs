use crate::aggregate::{AggregateResult, RiskTier, ServiceUsage};
use crate::extraction::ExtractedEntities;
use serde::Serialize;
use std::fmt;

/// Presentation-agnostic result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredReport {
    pub risk_tier: RiskTier,
    pub tier_label: String,
    pub total_score: f64,
    /// `total_score` rounded and clamped to 0-100 for display.
    pub display_score: u8,
    pub confidence: u8,
    pub is_scam: bool,
    pub summary: String,
    pub analysis: String,
    pub top_indicators: Vec<String>,
    pub indicators: Vec<String>,
    pub suspicious_elements: Vec<String>,
    pub recommendations: Vec<String>,
    pub services_used: Vec<ServiceUsage>,
    pub urls_detected: usize,
    pub emails_detected: usize,
    pub analysis_duration_ms: u64,
}

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(
        aggregate: &AggregateResult,
        recommendations: Vec<String>,
        analysis_duration_ms: u64,
        entities: &ExtractedEntities,
    ) -> StructuredReport {
        let available = aggregate.available_service_count();
        let analysis = aggregate.classifier_analysis.clone().unwrap_or_else(|| {
            format!("Analysis completed using {available} services in {analysis_duration_ms}ms")
        });

        StructuredReport {
            risk_tier: aggregate.risk_tier,
            tier_label: aggregate.risk_tier.label().to_string(),
            total_score: aggregate.total_score,
            display_score: aggregate.total_score.clamp(0.0, 100.0).round() as u8,
            confidence: aggregate.confidence,
            is_scam: aggregate.risk_tier.is_scam(),
            summary: summary_for(aggregate.risk_tier).to_string(),
            analysis,
            top_indicators: aggregate.summary_indicators.clone(),
            indicators: aggregate.indicators.clone(),
            suspicious_elements: aggregate.suspicious_elements.clone(),
            recommendations,
            services_used: aggregate.services_used.clone(),
            urls_detected: entities.urls.len(),
            emails_detected: entities.emails.len(),
            analysis_duration_ms,
        }
    }

}

fn summary_for(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "High risk: this message shows strong signs of a scam.",
        RiskTier::Medium => "Medium risk: this message has several suspicious elements.",
        RiskTier::LowMedium => "Low to medium risk: a few elements of this message warrant caution.",
        RiskTier::Low => "Low risk: this content appears to be legitimate.",
    }
}

impl fmt::Display for StructuredReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Risk level: {} (score {}/100)", self.tier_label, self.display_score)?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "Confidence: {}%", self.confidence)?;
        writeln!(f)?;

        if !self.top_indicators.is_empty() {
            writeln!(f, "Key indicators:")?;
            for indicator in &self.top_indicators {
                writeln!(f, "  - {indicator}")?;
            }
            if self.indicators.len() > self.top_indicators.len() {
                writeln!(
                    f,
                    "  ({} more)",
                    self.indicators.len() - self.top_indicators.len()
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Recommendations:")?;
        for recommendation in &self.recommendations {
            writeln!(f, "  - {recommendation}")?;
        }
        writeln!(f)?;

        writeln!(f, "Services:")?;
        for service in &self.services_used {
            let mark = if service.available { "available" } else { "unavailable" };
            writeln!(f, "  - {}: {}", service.name, mark)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.analysis)?;
        write!(
            f,
            "{} URL(s), {} email(s) detected in {}ms",
            self.urls_detected, self.emails_detected, self.analysis_duration_ms
        )
    }
}
