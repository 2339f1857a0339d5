pub mod keyword_indicators;
pub mod link_analyzer;

use crate::config::Config;
use crate::error::ConfigError;
use serde::Serialize;

/// The message under analysis as seen by local feature extractors.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub text: &'a str,
    pub urls: &'a [String],
    pub emails: &'a [String],
}

/// One pattern match found in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorHit {
    pub category: String,
    pub matched_pattern: String,
    pub points: u32,
    /// User-facing rendering of the hit.
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureScore {
    pub feature_name: String,
    pub score: u32,
    pub hits: Vec<IndicatorHit>,
}

impl FeatureScore {
    pub fn from_hits(feature_name: &str, hits: Vec<IndicatorHit>) -> Self {
        Self {
            feature_name: feature_name.to_string(),
            score: hits.iter().map(|h| h.points).sum(),
            hits,
        }
    }
}

/// Output of the local heuristic pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalAnalysis {
    pub score: u32,
    pub hits: Vec<IndicatorHit>,
    pub indicators: Vec<String>,
}

pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, message: &MessageContext<'_>) -> FeatureScore;
    fn name(&self) -> &str;
}

/// Runs every local extractor in a fixed order: keyword categories in
/// configured order, then URL-shape heuristics per URL.
pub struct FeatureEngine {
    extractors: Vec<Box<dyn FeatureExtractor>>,
}

impl FeatureEngine {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            extractors: vec![
                Box::new(keyword_indicators::KeywordIndicatorAnalyzer::from_config(
                    &config.indicators,
                )?),
                Box::new(link_analyzer::LinkAnalyzer::from_config(
                    &config.url_heuristics,
                )?),
            ],
        })
    }

    pub fn analyze_locally(&self, text: &str, urls: &[String], emails: &[String]) -> LocalAnalysis {
        let message = MessageContext { text, urls, emails };
        let mut analysis = LocalAnalysis::default();

        for extractor in &self.extractors {
            let feature = extractor.extract(&message);
            log::debug!(
                "{}: {} hit(s), {} point(s)",
                extractor.name(),
                feature.hits.len(),
                feature.score
            );
            analysis.score += feature.score;
            analysis
                .indicators
                .extend(feature.hits.iter().map(|h| h.description.clone()));
            analysis.hits.extend(feature.hits);
        }

        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FeatureEngine {
        FeatureEngine::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_brand_urgency_scenario() {
        let analysis = engine().analyze_locally("Your AusPost parcel is suspended, act now", &[], &[]);

        assert_eq!(analysis.score, 47);
        assert_eq!(
            analysis.indicators,
            vec![
                "Delivery scam indicator: \"parcel\"".to_string(),
                "Brand impersonation: \"auspost\"".to_string(),
                "Creates false urgency: \"act now\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_clean_text_scores_zero() {
        let analysis = engine().analyze_locally("See you at lunch tomorrow", &[], &[]);
        assert_eq!(analysis, LocalAnalysis::default());
    }

    #[test]
    fn test_keywords_precede_url_heuristics() {
        let text = "Click here: http://qwerty.tk/pay";
        let urls = vec!["http://qwerty.tk/pay".to_string()];
        let analysis = engine().analyze_locally(text, &urls, &[]);

        let categories: Vec<&str> = analysis.hits.iter().map(|h| h.category.as_str()).collect();
        assert_eq!(categories, vec!["instruction", "suspicious_tld", "random_domain"]);
        assert_eq!(analysis.score, 10 + 35 + 30);
    }

    #[test]
    fn test_score_never_decreases_with_more_indicators() {
        let engine = engine();
        let mut text = String::from("Hello");
        let mut previous = engine.analyze_locally(&text, &[], &[]).score;

        for phrase in ["urgent", "password", "urgent", "lottery", "click here"] {
            text.push(' ');
            text.push_str(phrase);
            let score = engine.analyze_locally(&text, &[], &[]).score;
            assert!(score > previous, "adding '{phrase}' did not raise the score");
            previous = score;
        }
    }

    #[test]
    fn test_deterministic_ordering() {
        let engine = engine();
        let text = "URGENT: PayPal says your password expires today. Reply with your PIN.";
        let first = engine.analyze_locally(text, &[], &[]);
        let second = engine.analyze_locally(text, &[], &[]);
        assert_eq!(first, second);
    }
}
