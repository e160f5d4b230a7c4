//! Social media profile search.
//!
//! Looks for profiles matching a name or username across GitHub, Twitter/X,
//! LinkedIn, Instagram, Facebook, and Reddit. GitHub has a public search API;
//! Twitter/X, Instagram, and Reddit get an existence probe against the
//! profile URL; LinkedIn and Facebook only allow logged-in search, so those
//! platforms return a constructed search URL with a note.
//!
//! Every platform sub-call fails soft: a transport error or unexpected
//! status empties that platform's list without touching the others.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::GITHUB_RESULT_LIMIT;
use crate::error_handling::ProviderStats;
use crate::providers::Category;

/// One profile (or manual-search pointer) on one platform.
///
/// Platforms populate different subsets of these fields; absent fields are
/// omitted from the serialized record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SocialProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SocialProfile {
    fn probe_hit(platform: &str, username: &str, profile_url: String) -> Self {
        SocialProfile {
            username: Some(username.to_string()),
            name: None,
            profile_url: Some(profile_url),
            search_url: None,
            avatar: None,
            account_type: None,
            platform: platform.to_string(),
            note: None,
        }
    }

    fn manual_search(platform: &str, name: &str, search_url: String, note: &str) -> Self {
        SocialProfile {
            username: None,
            name: Some(name.to_string()),
            profile_url: None,
            search_url: Some(search_url),
            avatar: None,
            account_type: None,
            platform: platform.to_string(),
            note: Some(note.to_string()),
        }
    }
}

/// Per-platform profile lists, in fixed platform order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SocialResults {
    pub github: Vec<SocialProfile>,
    pub twitter: Vec<SocialProfile>,
    pub linkedin: Vec<SocialProfile>,
    pub instagram: Vec<SocialProfile>,
    pub facebook: Vec<SocialProfile>,
    pub reddit: Vec<SocialProfile>,
}

#[derive(Debug, Deserialize)]
struct GithubSearchResponse {
    #[serde(default)]
    items: Vec<GithubUser>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: Option<String>,
    html_url: Option<String>,
    avatar_url: Option<String>,
    #[serde(rename = "type")]
    account_type: Option<String>,
}

/// Social media profile search adapter.
pub struct SocialSearch {
    client: Arc<reqwest::Client>,
    probe_client: Arc<reqwest::Client>,
    stats: Arc<ProviderStats>,
}

impl SocialSearch {
    pub fn new(
        client: Arc<reqwest::Client>,
        probe_client: Arc<reqwest::Client>,
        stats: Arc<ProviderStats>,
    ) -> Self {
        SocialSearch {
            client,
            probe_client,
            stats,
        }
    }

    /// Searches every platform for the given name or username.
    ///
    /// The networked platforms run concurrently; the constructed-URL
    /// platforms are assembled inline.
    pub async fn search(&self, name: &str) -> SocialResults {
        let (github, twitter, instagram, reddit) = futures::join!(
            self.search_github(name),
            self.probe_profile("Twitter/X", name, format!("https://twitter.com/{name}")),
            self.probe_profile(
                "Instagram",
                name,
                format!("https://www.instagram.com/{name}/")
            ),
            self.probe_profile("Reddit", name, format!("https://www.reddit.com/user/{name}/")),
        );

        SocialResults {
            github,
            twitter,
            linkedin: self.linkedin_record(name),
            instagram,
            facebook: self.facebook_record(name),
            reddit,
        }
    }

    /// Queries the GitHub user search API, keeping the first few matches.
    async fn search_github(&self, name: &str) -> Vec<SocialProfile> {
        let request = self
            .client
            .get("https://api.github.com/search/users")
            .query(&[("q", name)]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("GitHub search failed for {name:?}: {e}");
                self.stats.record_soft_failure(Category::SocialMedia);
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            log::debug!(
                "GitHub search for {name:?} returned status {}",
                response.status()
            );
            return Vec::new();
        }

        match response.json::<GithubSearchResponse>().await {
            Ok(body) => body
                .items
                .into_iter()
                .take(GITHUB_RESULT_LIMIT)
                .map(|user| SocialProfile {
                    profile_url: user.html_url,
                    username: user.login,
                    avatar: user.avatar_url,
                    account_type: user.account_type,
                    name: None,
                    search_url: None,
                    platform: "GitHub".to_string(),
                    note: None,
                })
                .collect(),
            Err(e) => {
                log::warn!("GitHub search returned undecodable body for {name:?}: {e}");
                self.stats.record_soft_failure(Category::SocialMedia);
                Vec::new()
            }
        }
    }

    /// Probes a profile URL with redirects disabled.
    ///
    /// Platforms redirect unknown handles to login or search pages, so only
    /// a direct 200 counts as an existing profile.
    async fn probe_profile(
        &self,
        platform: &str,
        username: &str,
        profile_url: String,
    ) -> Vec<SocialProfile> {
        match self.probe_client.get(&profile_url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                vec![SocialProfile::probe_hit(platform, username, profile_url)]
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                log::warn!("{platform} probe failed for {profile_url}: {e}");
                self.stats.record_soft_failure(Category::SocialMedia);
                Vec::new()
            }
        }
    }

    /// LinkedIn directory search URL; full results need a login.
    fn linkedin_record(&self, name: &str) -> Vec<SocialProfile> {
        let mut parts = name.split_whitespace();
        let first = parts.next().unwrap_or_default();
        let last = parts.last().unwrap_or_default();
        let search_url = format!("https://www.linkedin.com/pub/dir/?first={first}&last={last}");
        vec![SocialProfile::manual_search(
            "LinkedIn",
            name,
            search_url,
            "LinkedIn requires login for full access",
        )]
    }

    /// Facebook people-search URL; full results need a login.
    fn facebook_record(&self, name: &str) -> Vec<SocialProfile> {
        let search_url = format!("https://www.facebook.com/search/people/?q={name}");
        vec![SocialProfile::manual_search(
            "Facebook",
            name,
            search_url,
            "Facebook requires login for full access",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::initialization::{init_client, init_probe_client};

    fn test_adapter() -> SocialSearch {
        let config = Config::default();
        SocialSearch::new(
            init_client(&config).expect("client"),
            init_probe_client(&config).expect("probe client"),
            Arc::new(ProviderStats::new()),
        )
    }

    #[test]
    fn test_linkedin_record_splits_name() {
        let adapter = test_adapter();
        let records = adapter.linkedin_record("Jane Doe");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].search_url.as_deref(),
            Some("https://www.linkedin.com/pub/dir/?first=Jane&last=Doe")
        );
        assert_eq!(records[0].platform, "LinkedIn");
        assert!(records[0].note.is_some());
    }

    #[test]
    fn test_linkedin_record_single_token_has_empty_last() {
        let adapter = test_adapter();
        let records = adapter.linkedin_record("janedoe");
        assert_eq!(
            records[0].search_url.as_deref(),
            Some("https://www.linkedin.com/pub/dir/?first=janedoe&last=")
        );
    }

    #[test]
    fn test_facebook_record_is_manual_search() {
        let adapter = test_adapter();
        let records = adapter.facebook_record("Jane Doe");
        assert_eq!(records.len(), 1);
        assert!(records[0]
            .search_url
            .as_deref()
            .expect("search url")
            .contains("facebook.com/search/people"));
        assert!(records[0].profile_url.is_none());
    }

    #[test]
    fn test_github_response_decoding() {
        let body = r#"{"total_count":2,"items":[
            {"login":"janedoe","html_url":"https://github.com/janedoe","avatar_url":"https://a.example/1.png","type":"User"},
            {"login":"jane-doe","html_url":"https://github.com/jane-doe","avatar_url":null,"type":"Organization"}
        ]}"#;
        let decoded: GithubSearchResponse = serde_json::from_str(body).expect("decodes");
        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.items[0].login.as_deref(), Some("janedoe"));
        assert_eq!(decoded.items[1].account_type.as_deref(), Some("Organization"));
    }
}
