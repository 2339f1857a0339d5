//! User-facing next steps, most urgent first.

use crate::aggregate::RiskTier;

/// Pure function of the tier and of which entities were present.
/// `indicators` does not currently change the advice.
pub fn recommend(
    tier: RiskTier,
    _indicators: &[String],
    urls: &[String],
    emails: &[String],
) -> Vec<String> {
    let has_urls = !urls.is_empty();
    let has_emails = !emails.is_empty();
    let mut out: Vec<&str> = Vec::new();

    match tier {
        RiskTier::High => {
            out.push("Do not interact with this message - Multiple high-risk indicators detected");
            if has_urls {
                out.push("Avoid clicking the detected URLs - Links identified as dangerous");
            }
            out.push("Verify sender through official channels - Always confirm unexpected messages");
            if has_emails {
                out.push("Check if your email has been compromised - Consider changing passwords");
            }
        }
        RiskTier::Medium => {
            out.push("Exercise caution with this message - Several suspicious elements found");
            if has_urls {
                out.push("Verify URLs before clicking - Check domain authenticity");
            }
            out.push("Confirm sender identity through alternative means");
        }
        RiskTier::LowMedium => {
            out.push("Be cautious and verify sender identity");
            if has_urls {
                out.push("Check URL destinations before clicking");
            }
            out.push("When in doubt, contact the organization directly");
        }
        RiskTier::Low => {
            out.push("Message appears legitimate but always stay vigilant");
            out.push("Continue following good cybersecurity practices");
        }
    }

    out.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(item: &str) -> Vec<String> {
        vec![item.to_string()]
    }

    #[test]
    fn test_high_with_everything() {
        let recs = recommend(RiskTier::High, &[], &some("http://x.tk"), &some("a@b.com"));
        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("Do not interact"));
        assert!(recs[1].starts_with("Avoid clicking"));
        assert!(recs[2].starts_with("Verify sender"));
        assert!(recs[3].starts_with("Check if your email has been compromised"));
    }

    #[test]
    fn test_high_without_entities() {
        let recs = recommend(RiskTier::High, &[], &[], &[]);
        assert_eq!(recs.len(), 2);
        assert!(recs[1].starts_with("Verify sender"));
    }

    #[test]
    fn test_medium_url_conditional() {
        assert_eq!(recommend(RiskTier::Medium, &[], &[], &some("a@b.com")).len(), 2);
        let recs = recommend(RiskTier::Medium, &[], &some("http://x.com"), &[]);
        assert_eq!(recs[1], "Verify URLs before clicking - Check domain authenticity");
    }

    #[test]
    fn test_low_medium_and_low() {
        let recs = recommend(RiskTier::LowMedium, &[], &[], &[]);
        assert_eq!(
            recs,
            vec![
                "Be cautious and verify sender identity".to_string(),
                "When in doubt, contact the organization directly".to_string(),
            ]
        );

        // Entities never add advice at the lowest tier
        let recs = recommend(RiskTier::Low, &[], &some("http://x.com"), &some("a@b.com"));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Message appears legitimate"));
    }
}
