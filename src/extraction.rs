use regex::Regex;
use serde::Serialize;

/// Emails and URLs found in one message, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedEntities {
    pub urls: Vec<String>,
    pub emails: Vec<String>,
}

impl ExtractedEntities {
    pub fn has_urls(&self) -> bool {
        !self.urls.is_empty()
    }

    pub fn has_emails(&self) -> bool {
        !self.emails.is_empty()
    }
}

pub struct EntityExtractor {
    email_regex: Regex,
    url_regex: Regex,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b")
                .expect("email pattern is a valid regex"),
            // Runs to the next whitespace; trailing punctuation stays attached
            url_regex: Regex::new(r"(?i)https?://\S+").expect("url pattern is a valid regex"),
        }
    }

    /// Duplicates are kept so downstream consumers can count occurrences.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let urls = self
            .url_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        let emails = self
            .email_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        ExtractedEntities { urls, emails }
    }
}
