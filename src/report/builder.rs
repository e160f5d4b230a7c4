//! Report assembly.
//!
//! Computes summary counters, extracts findings with severities, and
//! generates recommendation text from a results bundle. The builder is
//! deterministic: the same bundle always produces the same summary,
//! findings, and recommendations (only `generated_at` differs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::report::bundle::ResultsBundle;

/// Fixed summary counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub total_findings: usize,
    pub social_media_profiles: usize,
    pub email_addresses: usize,
    pub phone_numbers: usize,
    pub addresses: usize,
    pub images_found: usize,
}

impl Summary {
    /// Builds a summary from the category counters.
    ///
    /// `total_findings` is always derived here, never accepted from input.
    fn from_counts(
        social_media_profiles: usize,
        email_addresses: usize,
        phone_numbers: usize,
        addresses: usize,
        images_found: usize,
    ) -> Self {
        Summary {
            total_findings: social_media_profiles
                + email_addresses
                + phone_numbers
                + addresses
                + images_found,
            social_media_profiles,
            email_addresses,
            phone_numbers,
            addresses,
            images_found,
        }
    }
}

/// Finding categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    SocialMedia,
    Email,
    Phone,
}

/// Finding severities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// One extracted finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub count: usize,
    pub severity: Severity,
}

/// A generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub recommendations: Vec<String>,
    /// The caller's bundle, echoed back verbatim.
    pub raw_data: Value,
}

/// Builds reports from results bundles.
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        ReportBuilder
    }

    /// Generates a report for a caller-supplied results bundle.
    ///
    /// The bundle may be any shape; absent or wrong-typed sections count as
    /// empty and never fail the build.
    pub fn build(&self, raw_data: Value, report_id: Uuid) -> Report {
        let bundle = ResultsBundle::from_value(&raw_data);

        Report {
            report_id,
            generated_at: Utc::now(),
            summary: self.summarize(&bundle),
            findings: self.extract_findings(&bundle),
            recommendations: self.recommendations(&bundle),
            raw_data,
        }
    }

    /// Computes the summary counters.
    fn summarize(&self, bundle: &ResultsBundle) -> Summary {
        let categories = bundle.categories();

        let social_media_profiles = categories
            .social_media
            .as_ref()
            .map(|platforms| platforms.values().map(|profiles| profiles.len()).sum::<usize>())
            .unwrap_or(0);
        let email_addresses = categories.emails.as_ref().map_or(0, |list| list.len());
        let phone_numbers = categories.phones.as_ref().map_or(0, |list| list.len());
        let addresses = categories.addresses.as_ref().map_or(0, |list| list.len());
        let images_found = categories
            .image
            .as_ref()
            .and_then(|section| section.results.as_ref())
            .map_or(0, |list| list.len());

        Summary::from_counts(
            social_media_profiles,
            email_addresses,
            phone_numbers,
            addresses,
            images_found,
        )
    }

    /// Extracts key findings.
    ///
    /// Social media produces one finding per platform with a non-empty
    /// list; emails and phones each produce one aggregate finding. Emails
    /// and phones rank high because they identify a person more directly
    /// than a public handle does.
    fn extract_findings(&self, bundle: &ResultsBundle) -> Vec<Finding> {
        let categories = bundle.categories();
        let mut findings = Vec::new();

        if let Some(platforms) = &categories.social_media {
            for (platform, profiles) in platforms {
                if !profiles.is_empty() {
                    findings.push(Finding {
                        kind: FindingKind::SocialMedia,
                        platform: Some(platform.clone()),
                        count: profiles.len(),
                        severity: Severity::Medium,
                    });
                }
            }
        }

        if let Some(emails) = &categories.emails {
            if !emails.is_empty() {
                findings.push(Finding {
                    kind: FindingKind::Email,
                    platform: None,
                    count: emails.len(),
                    severity: Severity::High,
                });
            }
        }

        if let Some(phones) = &categories.phones {
            if !phones.is_empty() {
                findings.push(Finding {
                    kind: FindingKind::Phone,
                    platform: None,
                    count: phones.len(),
                    severity: Severity::High,
                });
            }
        }

        findings
    }

    /// Generates recommendation text in fixed category order.
    fn recommendations(&self, bundle: &ResultsBundle) -> Vec<String> {
        let categories = bundle.categories();
        let mut recommendations = Vec::new();

        if categories.social_media.is_some() {
            recommendations.push("Review social media privacy settings".to_string());
        }
        if categories.emails.as_ref().is_some_and(|list| !list.is_empty()) {
            recommendations
                .push("Consider using email aliases for public registrations".to_string());
        }
        if categories.phones.as_ref().is_some_and(|list| !list.is_empty()) {
            recommendations.push("Be cautious sharing phone numbers publicly".to_string());
        }

        if recommendations.is_empty() {
            recommendations.push("No specific recommendations at this time".to_string());
        }

        recommendations
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
