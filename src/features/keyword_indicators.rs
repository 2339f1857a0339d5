use super::{FeatureExtractor, FeatureScore, IndicatorHit, MessageContext};
use crate::config::{compile_pattern, IndicatorCategory};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

struct CompiledCategory {
    name: String,
    label: String,
    points_per_match: u32,
    patterns: Vec<(String, Regex)>,
}

/// Scores the message against the weighted phrase categories.
pub struct KeywordIndicatorAnalyzer {
    categories: Vec<CompiledCategory>,
}

impl KeywordIndicatorAnalyzer {
    pub fn from_config(categories: &[IndicatorCategory]) -> Result<Self, ConfigError> {
        let mut compiled = Vec::with_capacity(categories.len());

        for category in categories {
            if category.points_per_match == 0 {
                return Err(ConfigError::ZeroPoints(category.name.clone()));
            }

            // A phrase listed twice in one category must not double count
            let mut seen = HashSet::new();
            let mut patterns = Vec::new();
            for pattern in &category.patterns {
                let phrase = pattern.trim().to_lowercase();
                if phrase.is_empty() || !seen.insert(phrase.clone()) {
                    continue;
                }
                let regex = compile_pattern(&phrase_regex(&phrase))?;
                patterns.push((phrase, regex));
            }

            compiled.push(CompiledCategory {
                name: category.name.clone(),
                label: category.label.clone(),
                points_per_match: category.points_per_match,
                patterns,
            });
        }

        Ok(Self {
            categories: compiled,
        })
    }
}

/// Case-insensitive whole-phrase match. Word boundaries are only asserted
/// next to word characters so phrases such as `$1000` still match.
fn phrase_regex(phrase: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if phrase.starts_with(is_word) { r"\b" } else { "" };
    let trailing = if phrase.ends_with(is_word) { r"\b" } else { "" };
    format!("(?i){}{}{}", leading, regex::escape(phrase), trailing)
}

impl FeatureExtractor for KeywordIndicatorAnalyzer {
    fn extract(&self, message: &MessageContext<'_>) -> FeatureScore {
        let mut hits = Vec::new();

        for category in &self.categories {
            for (phrase, regex) in &category.patterns {
                // Every occurrence counts
                for _ in regex.find_iter(message.text) {
                    hits.push(IndicatorHit {
                        category: category.name.clone(),
                        matched_pattern: phrase.clone(),
                        points: category.points_per_match,
                        description: format!("{}: \"{}\"", category.label, phrase),
                    });
                }
            }
        }

        FeatureScore::from_hits(self.name(), hits)
    }

    fn name(&self) -> &str {
        "keyword_indicators"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_indicator_categories;

    fn analyze(text: &str) -> FeatureScore {
        let analyzer = KeywordIndicatorAnalyzer::from_config(&default_indicator_categories()).unwrap();
        analyzer.extract(&MessageContext {
            text,
            urls: &[],
            emails: &[],
        })
    }

    #[test]
    fn test_counts_each_occurrence() {
        let score = analyze("urgent urgent URGENT");
        assert_eq!(score.hits.len(), 3);
        assert_eq!(score.score, 36);
    }

    #[test]
    fn test_whole_word_matching() {
        // "spinning" must not trigger "pin", "tomato" must not trigger "ato"
        assert_eq!(analyze("spinning tomato soup").score, 0);
        assert_eq!(analyze("Send your PIN to the ATO").score, 25 + 20);
    }

    #[test]
    fn test_duplicate_patterns_in_category_count_once() {
        let categories = vec![IndicatorCategory {
            name: "urgency".to_string(),
            label: "Creates false urgency".to_string(),
            points_per_match: 12,
            patterns: vec!["urgent".to_string(), "URGENT ".to_string()],
        }];
        let analyzer = KeywordIndicatorAnalyzer::from_config(&categories).unwrap();
        let score = analyzer.extract(&MessageContext {
            text: "this is urgent",
            urls: &[],
            emails: &[],
        });
        assert_eq!(score.score, 12);
    }

    #[test]
    fn test_personal_info_request() {
        let score = analyze("Please confirm your password and date of birth");
        assert_eq!(score.score, 50);
        assert_eq!(
            score.hits[0].description,
            "Requests personal information: \"password\""
        );
        assert_eq!(score.hits[1].matched_pattern, "date of birth");
    }

    #[test]
    fn test_phrase_regex_boundaries() {
        assert_eq!(phrase_regex("pin"), r"(?i)\bpin\b");
        assert_eq!(phrase_regex("$1000"), r"(?i)\$1000\b");
    }

    #[test]
    fn test_rejects_zero_points() {
        let categories = vec![IndicatorCategory {
            name: "broken".to_string(),
            label: "Broken".to_string(),
            points_per_match: 0,
            patterns: vec!["x".to_string()],
        }];
        assert!(KeywordIndicatorAnalyzer::from_config(&categories).is_err());
    }
}
