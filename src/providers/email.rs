//! Email address lookup and validation.
//!
//! Validates the address format, resolves the domain's mail-exchanger
//! records, and generates candidate address patterns for a name. Breach data
//! and profile discovery need external APIs and stay empty stubs.

use std::sync::Arc;

use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use regex::Regex;
use serde::Serialize;

use crate::error_handling::ProviderStats;
use crate::providers::Category;
use crate::utils::sanitize_error_message;

/// Accepted email shape. Anything that fails this gate skips DNS entirely.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Mail-domain details for a validated address.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DomainInfo {
    pub domain: Option<String>,
    pub mx_records: Vec<String>,
    pub has_mx: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fixed-shape lookup record for one email address.
#[derive(Debug, Clone, Serialize)]
pub struct EmailRecord {
    pub email: String,
    pub valid_format: bool,
    pub domain: Option<String>,
    pub domain_info: DomainInfo,
    /// Breach lookups need external APIs; always empty.
    pub breach_data: Vec<serde_json::Value>,
    /// Profile discovery needs external APIs; always empty.
    pub social_profiles: Vec<serde_json::Value>,
}

/// Candidate address patterns guessed from a name.
///
/// These are suggestions, not findings: nothing has checked that any of the
/// patterns exist, which is what `verified: false` records.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmailGuess {
    pub suggested_patterns: Vec<String>,
    pub verified: bool,
    pub note: String,
}

/// Email lookup adapter.
pub struct EmailLookup {
    resolver: Arc<TokioAsyncResolver>,
    pattern: Regex,
    stats: Arc<ProviderStats>,
}

impl EmailLookup {
    pub fn new(resolver: Arc<TokioAsyncResolver>, stats: Arc<ProviderStats>) -> Self {
        EmailLookup {
            resolver,
            // The pattern is a literal; it cannot fail to compile
            pattern: Regex::new(EMAIL_PATTERN).expect("email pattern compiles"),
            stats,
        }
    }

    /// Looks up one email address.
    ///
    /// An address that fails the format gate comes back with
    /// `valid_format: false` and every other field empty; no DNS queries are
    /// made for it.
    pub async fn lookup(&self, email: &str) -> EmailRecord {
        let mut record = EmailRecord {
            email: email.to_string(),
            valid_format: false,
            domain: None,
            domain_info: DomainInfo::default(),
            breach_data: Vec::new(),
            social_profiles: Vec::new(),
        };

        if !self.pattern.is_match(email) {
            return record;
        }

        record.valid_format = true;
        let domain = email.split('@').nth(1).unwrap_or_default().to_string();
        record.domain_info = self.domain_info(&domain).await;
        record.domain = Some(domain);
        record
    }

    /// Resolves mail-exchanger records for a domain.
    ///
    /// A clean answer with zero records leaves `has_mx` false with no error;
    /// only transport-level failures set the soft `error` field.
    async fn domain_info(&self, domain: &str) -> DomainInfo {
        let mut info = DomainInfo {
            domain: Some(domain.to_string()),
            ..Default::default()
        };

        match self.lookup_mx_records(domain).await {
            Ok(exchangers) => {
                info.has_mx = !exchangers.is_empty();
                info.mx_records = exchangers;
            }
            Err(message) => {
                self.stats.record_soft_failure(Category::Emails);
                info.error = Some(sanitize_error_message(&message));
            }
        }

        info
    }

    /// Queries MX records, sorted by priority (lower preference first).
    async fn lookup_mx_records(&self, domain: &str) -> Result<Vec<String>, String> {
        match self.resolver.lookup(domain, RecordType::MX).await {
            Ok(lookup) => {
                let mut mx_records: Vec<(u16, String)> = lookup
                    .iter()
                    .filter_map(|rdata| {
                        if let RData::MX(mx) = rdata {
                            Some((mx.preference(), mx.exchange().to_utf8()))
                        } else {
                            None
                        }
                    })
                    .collect();
                mx_records.sort_by_key(|(priority, _)| *priority);
                Ok(mx_records
                    .into_iter()
                    .map(|(_, exchange)| exchange)
                    .collect())
            }
            Err(e) => {
                let error_msg = e.to_string();
                // "no records found" is expected for domains without mail
                // servers - return empty vector
                if error_msg.contains("no records found") || error_msg.contains("NXDomain") {
                    Ok(Vec::new())
                } else {
                    log::warn!("Failed to lookup MX records for {domain}: {e}");
                    Err(error_msg)
                }
            }
        }
    }

    /// Generates candidate email patterns from a two-part name.
    ///
    /// Returns at most one suggestion record (first.last, firstlast, flast);
    /// single-token names produce nothing.
    pub fn search_by_name(&self, name: &str) -> Vec<EmailGuess> {
        let parts: Vec<String> = name
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
            return Vec::new();
        };
        if parts.len() < 2 {
            return Vec::new();
        }

        let mut patterns = vec![format!("{first}.{last}"), format!("{first}{last}")];
        if let Some(initial) = first.chars().next() {
            patterns.push(format!("{initial}{last}"));
        }

        vec![EmailGuess {
            suggested_patterns: patterns,
            verified: false,
            note: "Unverified suggestions - use email finder APIs for actual results".to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_resolver;

    fn test_adapter() -> EmailLookup {
        EmailLookup::new(init_resolver(), Arc::new(ProviderStats::new()))
    }

    #[test]
    fn test_format_gate_accepts_normal_addresses() {
        let adapter = test_adapter();
        for email in [
            "jane@example.com",
            "jane.doe+tag@mail.example.co.uk",
            "j_d%x-1@sub.example.io",
        ] {
            assert!(adapter.pattern.is_match(email), "{email} should match");
        }
    }

    #[test]
    fn test_format_gate_rejects_malformed_addresses() {
        let adapter = test_adapter();
        for email in [
            "not-an-email",
            "missing@tld",
            "@example.com",
            "jane@.com",
            "jane doe@example.com",
            "jane@example.c",
            "",
        ] {
            assert!(!adapter.pattern.is_match(email), "{email} should not match");
        }
    }

    #[tokio::test]
    async fn test_invalid_format_skips_domain_lookup() {
        let adapter = test_adapter();
        let record = adapter.lookup("not-an-email").await;
        assert!(!record.valid_format);
        assert!(record.domain.is_none());
        assert_eq!(record.domain_info, DomainInfo::default());
        assert!(record.breach_data.is_empty());
        assert!(record.social_profiles.is_empty());
    }

    #[test]
    fn test_search_by_name_generates_three_patterns() {
        let adapter = test_adapter();
        let guesses = adapter.search_by_name("Jane Doe");
        assert_eq!(guesses.len(), 1);
        assert_eq!(
            guesses[0].suggested_patterns,
            vec!["jane.doe", "janedoe", "jdoe"]
        );
        assert!(!guesses[0].verified);
    }

    #[test]
    fn test_search_by_name_uses_first_and_final_token() {
        let adapter = test_adapter();
        let guesses = adapter.search_by_name("Jane Marie van Doe");
        assert_eq!(
            guesses[0].suggested_patterns,
            vec!["jane.doe", "janedoe", "jdoe"]
        );
    }

    #[test]
    fn test_search_by_name_single_token_is_empty() {
        let adapter = test_adapter();
        assert!(adapter.search_by_name("janedoe").is_empty());
        assert!(adapter.search_by_name("   ").is_empty());
    }
}
