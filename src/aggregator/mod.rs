//! Query aggregation.
//!
//! Fans one name query out to the enabled provider adapters, runs them
//! concurrently as independent tasks, and merges the partial results into a
//! single category-keyed map. Categories have no data dependency on each
//! other; each task gets its own timeout, and a timeout is treated exactly
//! like any other soft provider failure.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::providers::{Category, Providers, SoftError};

fn default_true() -> bool {
    true
}

/// Per-category enable flags for a name search.
///
/// Absent flags default to enabled, so an empty options object runs every
/// category.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchOptions {
    #[serde(default = "default_true")]
    pub social_media: bool,
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub phone: bool,
    #[serde(default = "default_true")]
    pub address: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            social_media: true,
            email: true,
            phone: true,
            address: true,
        }
    }
}

/// Category-keyed results for one aggregated name search.
///
/// Disabled categories (and the defensive case of a failed task) have no
/// key at all, matching the "omit rather than fail" merge rule.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct NameSearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Value>,
}

/// Fans name queries out to the providers and merges the results.
pub struct Aggregator {
    providers: Arc<Providers>,
    timeout: Duration,
}

impl Aggregator {
    pub fn new(providers: Arc<Providers>, timeout: Duration) -> Self {
        Aggregator { providers, timeout }
    }

    /// Runs every enabled category against the query.
    ///
    /// Never fails: each category resolves to its provider's record, a soft
    /// error record on timeout, or (if the task itself dies) no key.
    pub async fn aggregate(&self, name: &str, options: &SearchOptions) -> NameSearchResults {
        let mut handles: Vec<(Category, JoinHandle<Value>)> = Vec::new();

        if options.social_media {
            let providers = self.providers.clone();
            let query = name.to_string();
            handles.push((
                Category::SocialMedia,
                self.spawn_category(Category::SocialMedia, async move {
                    to_category_value(&providers.social.search(&query).await)
                }),
            ));
        }

        if options.email {
            let providers = self.providers.clone();
            let query = name.to_string();
            handles.push((
                Category::Emails,
                self.spawn_category(Category::Emails, async move {
                    to_category_value(&providers.email.search_by_name(&query))
                }),
            ));
        }

        if options.phone {
            let providers = self.providers.clone();
            let query = name.to_string();
            handles.push((
                Category::Phones,
                self.spawn_category(Category::Phones, async move {
                    to_category_value(&providers.phone.search_by_name(&query))
                }),
            ));
        }

        if options.address {
            let providers = self.providers.clone();
            let query = name.to_string();
            handles.push((
                Category::Addresses,
                self.spawn_category(Category::Addresses, async move {
                    to_category_value(&providers.address.search_by_name(&query).await)
                }),
            ));
        }

        let mut results = NameSearchResults::default();
        for (category, handle) in handles {
            match handle.await {
                Ok(value) => match category {
                    Category::SocialMedia => results.social_media = Some(value),
                    Category::Emails => results.emails = Some(value),
                    Category::Phones => results.phones = Some(value),
                    Category::Addresses => results.addresses = Some(value),
                    // Image and WiFi never run through the name fan-out
                    _ => {}
                },
                Err(e) => {
                    // Fail-soft adapters should make this unreachable; if a
                    // task still dies, the category key is omitted rather
                    // than failing the whole request
                    log::error!("{category} lookup task failed: {e}");
                }
            }
        }

        log::debug!(
            "aggregate for {name:?} complete ({} soft failures recorded so far)",
            self.providers.stats.total()
        );

        results
    }

    /// Spawns one category lookup with the per-adapter timeout applied.
    fn spawn_category(
        &self,
        category: Category,
        lookup: impl std::future::Future<Output = Value> + Send + 'static,
    ) -> JoinHandle<Value> {
        let timeout = self.timeout;
        let stats = self.providers.stats.clone();
        tokio::spawn(async move {
            match tokio::time::timeout(timeout, lookup).await {
                Ok(value) => value,
                Err(_) => {
                    log::warn!(
                        "{category} lookup timed out after {}s",
                        timeout.as_secs()
                    );
                    stats.record_soft_failure(category);
                    serde_json::to_value(SoftError::new(&format!(
                        "{category} lookup timed out"
                    )))
                    .unwrap_or_else(|_| json!({ "error": "lookup timed out" }))
                }
            }
        })
    }
}

/// Serializes a provider payload into the envelope value.
fn to_category_value<T: serde::Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or_else(|e| {
        log::error!("Failed to serialize provider payload: {e}");
        json!({ "error": "provider payload could not be serialized" })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default_to_all_enabled() {
        let options: SearchOptions = serde_json::from_str("{}").expect("decodes");
        assert!(options.social_media);
        assert!(options.email);
        assert!(options.phone);
        assert!(options.address);
    }

    #[test]
    fn test_options_partial_override() {
        let options: SearchOptions =
            serde_json::from_str(r#"{"email":false,"address":false}"#).expect("decodes");
        assert!(options.social_media);
        assert!(!options.email);
        assert!(options.phone);
        assert!(!options.address);
    }

    #[test]
    fn test_disabled_categories_serialize_without_keys() {
        let results = NameSearchResults {
            social_media: Some(json!({"github": []})),
            ..Default::default()
        };
        let value = serde_json::to_value(&results).expect("serializes");
        let map = value.as_object().expect("object");
        assert!(map.contains_key("social_media"));
        assert!(!map.contains_key("emails"));
        assert!(!map.contains_key("phones"));
        assert!(!map.contains_key("addresses"));
    }
}
