use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub services: ServicesConfig,
    /// Evaluated in list order; indicator output order follows it.
    pub indicators: Vec<IndicatorCategory>,
    pub url_heuristics: UrlHeuristicsConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub base_url: String,
    /// Per-call deadline; expiry is recorded as a service error.
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub scam_classifier: EndpointConfig,
    pub breach_check: EndpointConfig,
    pub link_reputation: EndpointConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A named, weighted set of phrases scanned for in the message text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorCategory {
    pub name: String,
    /// Prefix of the human-readable indicator, e.g. `Creates false urgency`.
    pub label: String,
    pub points_per_match: u32,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlHeuristicsConfig {
    pub suspicious_tlds: Vec<String>,
    pub suspicious_tld_points: u32,
    /// Matched against the lowercased host of each URL.
    pub random_domain_pattern: String,
    pub random_domain_points: u32,
    pub shorteners: Vec<String>,
    pub shortener_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: TierThresholds,
    pub breach_points: u32,
    /// Case-insensitive regexes; indicators matching any of them are upstream noise.
    pub technical_error_patterns: Vec<String>,
    pub summary_limit: usize,
    pub suspicious_element_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierThresholds {
    pub high: f64,
    pub medium: f64,
    pub low_medium: f64,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, category) in self.indicators.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(ConfigError::UnnamedCategory(i));
            }
            if category.points_per_match == 0 {
                return Err(ConfigError::ZeroPoints(category.name.clone()));
            }
            if category.patterns.iter().all(|p| p.trim().is_empty()) {
                return Err(ConfigError::EmptyCategory(category.name.clone()));
            }
        }

        compile_pattern(&self.url_heuristics.random_domain_pattern)?;
        for pattern in &self.scoring.technical_error_patterns {
            compile_pattern(pattern)?;
        }

        let t = &self.scoring.thresholds;
        if !(t.high > t.medium && t.medium > t.low_medium && t.low_medium > 0.0) {
            return Err(ConfigError::ThresholdOrder);
        }

        if url::Url::parse(&self.services.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(self.services.base_url.clone()));
        }
        if self.services.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: ServicesConfig::default(),
            indicators: default_indicator_categories(),
            url_heuristics: UrlHeuristicsConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 10,
            user_agent: format!("scam-radar/{}", env!("CARGO_PKG_VERSION")),
            scam_classifier: EndpointConfig {
                path: "/api/scam/comprehensive".to_string(),
                enabled: true,
            },
            breach_check: EndpointConfig {
                path: "/api/breach/check".to_string(),
                enabled: true,
            },
            link_reputation: EndpointConfig {
                path: "/api/link/analyze".to_string(),
                enabled: true,
            },
        }
    }
}

impl Default for UrlHeuristicsConfig {
    fn default() -> Self {
        Self {
            suspicious_tlds: strings(&[".tk", ".ml", ".ga", ".cf", ".buzz", ".click", ".download"]),
            suspicious_tld_points: 35,
            random_domain_pattern: r"^[a-z]{4,8}\.(buzz|tk|ml|ga|cf)$".to_string(),
            random_domain_points: 30,
            shorteners: strings(&["bit.ly", "tinyurl.com", "t.co", "goo.gl", "ow.ly"]),
            shortener_points: 15,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds {
                high: 70.0,
                medium: 40.0,
                low_medium: 15.0,
            },
            breach_points: 30,
            technical_error_patterns: strings(&[
                "(?i)content analysis failed",
                "(?i)HTTPSConnectionPool",
                "(?i)NameResolutionError",
                "(?i)failed to resolve",
                "(?i)max retries exceeded",
                "(?i)HTTP error",
            ]),
            summary_limit: 3,
            suspicious_element_keywords: strings(&[
                "suspicious",
                "dangerous",
                "random character domain",
                "Random character domain",
            ]),
        }
    }
}

/// The fixed indicator table. Each phrase belongs to exactly one category.
pub fn default_indicator_categories() -> Vec<IndicatorCategory> {
    vec![
        IndicatorCategory {
            name: "delivery".to_string(),
            label: "Delivery scam indicator".to_string(),
            points_per_match: 15,
            patterns: strings(&[
                "parcel",
                "package",
                "delivery",
                "shipped",
                "tracking",
                "postal code",
                "held",
                "customs",
                "warehouse",
                "courier",
                "postage",
                "shipment",
            ]),
        },
        IndicatorCategory {
            name: "brand".to_string(),
            label: "Brand impersonation".to_string(),
            points_per_match: 20,
            patterns: strings(&[
                "auspost",
                "australia post",
                "ato",
                "centrelink",
                "medicare",
                "telstra",
                "optus",
                "vodafone",
                "commonwealth bank",
                "anz",
                "westpac",
                "nab",
                "paypal",
                "amazon",
                "ebay",
                "netflix",
                "spotify",
                "apple",
                "google",
                "microsoft",
                "facebook",
                "instagram",
                "twitter",
                "fedex",
                "dhl",
                "ups",
            ]),
        },
        IndicatorCategory {
            name: "urgency".to_string(),
            label: "Creates false urgency".to_string(),
            points_per_match: 12,
            patterns: strings(&[
                "within 24 hours",
                "expires today",
                "immediate action",
                "urgent",
                "act now",
                "limited time",
                "expires soon",
                "verify now",
                "confirm immediately",
                "suspend",
                "block",
                "freeze",
                "close your account",
            ]),
        },
        IndicatorCategory {
            name: "financial".to_string(),
            label: "Financial fraud indicator".to_string(),
            points_per_match: 18,
            patterns: strings(&[
                "bank account",
                "credit card",
                "tax refund",
                "inheritance",
                "lottery",
                "winner",
                "prize",
                "million",
                "thousand",
                "transfer",
                "wire",
                "bitcoin",
                "cryptocurrency",
                "investment",
            ]),
        },
        IndicatorCategory {
            name: "instruction".to_string(),
            label: "Suspicious instruction".to_string(),
            points_per_match: 10,
            patterns: strings(&[
                "reply with",
                "click here",
                "download",
                "install",
                "enable",
                "exit and reopen",
                "copy and paste",
                "forward this message",
                "don't tell anyone",
                "keep this secret",
                "call this number",
            ]),
        },
        IndicatorCategory {
            name: "personal_info".to_string(),
            label: "Requests personal information".to_string(),
            points_per_match: 25,
            patterns: strings(&[
                "password",
                "pin",
                "ssn",
                "social security",
                "date of birth",
                "mother's maiden name",
                "security question",
                "account number",
                "routing number",
                "cvv",
                "security code",
            ]),
        },
    ]
}
