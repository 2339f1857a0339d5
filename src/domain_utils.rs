use url::Url;

/// Minimal host helpers for URLs pulled out of free text
pub struct DomainUtils;

impl DomainUtils {
    /// Lowercased host of a URL. Trailing punctuation picked up from the
    /// surrounding sentence is dropped from the host only.
    pub fn extract_host(url: &str) -> Option<String> {
        let host = match Url::parse(url) {
            Ok(parsed) => parsed.host_str().map(|h| h.to_lowercase()),
            Err(_) => {
                // Fall back to "everything between the scheme and the first slash"
                let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
                rest.split(['/', '?', '#'])
                    .next()
                    .map(|h| h.rsplit('@').next().unwrap_or(h))
                    .map(|h| h.split(':').next().unwrap_or(h).to_lowercase())
            }
        }?;

        let host = host.trim_end_matches(|c: char| !c.is_ascii_alphanumeric());
        if host.is_empty() {
            None
        } else {
            Some(host.to_string())
        }
    }

    /// Check if domain matches any in list (with hierarchy support)
    pub fn matches_domain_list<'a>(domain: &str, domain_list: &'a [String]) -> Option<&'a str> {
        let domain_lower = domain.to_lowercase();

        for pattern in domain_list {
            let pattern_lower = pattern.to_lowercase();

            if domain_lower == pattern_lower
                || domain_lower.ends_with(&format!(".{}", pattern_lower))
            {
                return Some(pattern.as_str());
            }
        }

        None
    }

    /// Canonicalize domain (remove www prefix)
    pub fn canonicalize_domain(domain: &str) -> String {
        let domain_lower = domain.to_lowercase();
        if let Some(stripped) = domain_lower.strip_prefix("www.") {
            stripped.to_string()
        } else {
            domain_lower
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host() {
        assert_eq!(
            DomainUtils::extract_host("https://Example.com/path"),
            Some("example.com".to_string())
        );
        assert_eq!(
            DomainUtils::extract_host("http://abcd.tk/login,"),
            Some("abcd.tk".to_string())
        );
        assert_eq!(
            DomainUtils::extract_host("https://abcd.tk,"),
            Some("abcd.tk".to_string())
        );
        assert_eq!(DomainUtils::extract_host("https://"), None);
    }

    #[test]
    fn test_matches_domain_list() {
        let domains = vec!["bit.ly".to_string(), "t.co".to_string()];

        assert_eq!(DomainUtils::matches_domain_list("bit.ly", &domains), Some("bit.ly"));
        assert_eq!(
            DomainUtils::matches_domain_list("www.bit.ly", &domains),
            Some("bit.ly")
        );
        assert_eq!(DomainUtils::matches_domain_list("microsoft.com", &domains), None);
        assert_eq!(DomainUtils::matches_domain_list("notbit.ly", &domains), None);
    }

    #[test]
    fn test_canonicalize_domain() {
        assert_eq!(
            DomainUtils::canonicalize_domain("www.example.com"),
            "example.com"
        );
        assert_eq!(
            DomainUtils::canonicalize_domain("example.com"),
            "example.com"
        );
    }
}
