//! Aggregator fail-soft guarantees at the library level.
//!
//! With a near-zero per-adapter timeout, every category that has to wait on
//! anything resolves to a soft error record; pure categories complete. In
//! both cases the aggregate returns normally with one entry per enabled
//! category and never an error.

use std::sync::Arc;
use std::time::Duration;

use osint_aggregator::{Aggregator, Config, Providers, SearchOptions};

fn providers() -> Arc<Providers> {
    Arc::new(Providers::new(&Config::default()).expect("providers build"))
}

#[tokio::test]
async fn test_aggregate_with_all_enabled_never_fails() {
    // 1ms is far below any network round trip: the social category (the
    // only networked one here without a credential) must degrade to a soft
    // error record instead of failing the request
    let aggregator = Aggregator::new(providers(), Duration::from_millis(1));

    let results = aggregator
        .aggregate("Jane Doe", &SearchOptions::default())
        .await;
    let value = serde_json::to_value(&results).expect("serializes");
    let map = value.as_object().expect("object");

    for key in ["social_media", "emails", "phones", "addresses"] {
        let entry = map.get(key).unwrap_or_else(|| panic!("{key} key missing"));
        // Every enabled category is present, as either a payload or a
        // soft error record - never absent, never a failure
        assert!(
            entry.is_object() || entry.is_array(),
            "{key} should hold a record, got {entry}"
        );
    }
}

#[tokio::test]
async fn test_aggregate_respects_enable_flags() {
    let aggregator = Aggregator::new(providers(), Duration::from_secs(5));

    let options = SearchOptions {
        social_media: false,
        email: true,
        phone: false,
        address: false,
    };
    let results = aggregator.aggregate("Jane Doe", &options).await;
    let value = serde_json::to_value(&results).expect("serializes");
    let map = value.as_object().expect("object");

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["emails"]);
}

#[tokio::test]
async fn test_aggregate_with_nothing_enabled_is_empty() {
    let aggregator = Aggregator::new(providers(), Duration::from_secs(5));

    let options = SearchOptions {
        social_media: false,
        email: false,
        phone: false,
        address: false,
    };
    let results = aggregator.aggregate("Jane Doe", &options).await;
    let value = serde_json::to_value(&results).expect("serializes");

    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn test_category_lists_preserve_insertion_order() {
    // The email category's guess record keeps its patterns in generation
    // order regardless of how the categories themselves interleave
    let aggregator = Aggregator::new(providers(), Duration::from_secs(5));

    let options = SearchOptions {
        social_media: false,
        email: true,
        phone: true,
        address: false,
    };
    let results = aggregator.aggregate("Jane Doe", &options).await;
    let value = serde_json::to_value(&results).expect("serializes");

    assert_eq!(
        value["emails"][0]["suggested_patterns"],
        serde_json::json!(["jane.doe", "janedoe", "jdoe"])
    );
    assert_eq!(value["phones"], serde_json::json!([]));
}
