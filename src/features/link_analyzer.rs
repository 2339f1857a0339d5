use super::{FeatureExtractor, FeatureScore, IndicatorHit, MessageContext};
use crate::config::{compile_pattern, UrlHeuristicsConfig};
use crate::domain_utils::DomainUtils;
use crate::error::ConfigError;
use regex::Regex;

/// URL-shape heuristics: abused TLDs, random-looking labels, shorteners.
pub struct LinkAnalyzer {
    suspicious_tlds: Vec<String>,
    suspicious_tld_points: u32,
    random_domain: Regex,
    random_domain_points: u32,
    shorteners: Vec<String>,
    shortener_points: u32,
}

impl LinkAnalyzer {
    pub fn from_config(config: &UrlHeuristicsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            suspicious_tlds: config
                .suspicious_tlds
                .iter()
                .map(|tld| normalize_tld(tld))
                .collect(),
            suspicious_tld_points: config.suspicious_tld_points,
            random_domain: compile_pattern(&config.random_domain_pattern)?,
            random_domain_points: config.random_domain_points,
            shorteners: config.shorteners.clone(),
            shortener_points: config.shortener_points,
        })
    }

    fn analyze_url(&self, url: &str, hits: &mut Vec<IndicatorHit>) {
        let Some(host) = DomainUtils::extract_host(url) else {
            log::debug!("No host in extracted URL: {url}");
            return;
        };

        if let Some(tld) = self.suspicious_tlds.iter().find(|tld| host.ends_with(tld.as_str())) {
            hits.push(IndicatorHit {
                category: "suspicious_tld".to_string(),
                matched_pattern: tld.clone(),
                points: self.suspicious_tld_points,
                description: format!("Highly suspicious domain: {url}"),
            });
        }

        let canonical = DomainUtils::canonicalize_domain(&host);
        if self.random_domain.is_match(&canonical) {
            hits.push(IndicatorHit {
                category: "random_domain".to_string(),
                matched_pattern: canonical.clone(),
                points: self.random_domain_points,
                description: format!("Random character domain: {canonical}"),
            });
        }

        if let Some(shortener) = DomainUtils::matches_domain_list(&host, &self.shorteners) {
            hits.push(IndicatorHit {
                category: "url_shortener".to_string(),
                matched_pattern: shortener.to_string(),
                points: self.shortener_points,
                description: format!("URL shortener detected: {shortener}"),
            });
        }
    }
}

fn normalize_tld(tld: &str) -> String {
    let tld = tld.trim().to_lowercase();
    if tld.starts_with('.') {
        tld
    } else {
        format!(".{tld}")
    }
}

impl FeatureExtractor for LinkAnalyzer {
    fn extract(&self, message: &MessageContext<'_>) -> FeatureScore {
        let mut hits = Vec::new();
        for url in message.urls {
            self.analyze_url(url, &mut hits);
        }
        FeatureScore::from_hits(self.name(), hits)
    }

    fn name(&self) -> &str {
        "link_analyzer"
    }
}
