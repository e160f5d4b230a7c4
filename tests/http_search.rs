//! Search endpoints over real HTTP.
//!
//! Network-reaching categories (social media) stay disabled here; the
//! pure categories (email guesses, phone, credential-less address stubs)
//! exercise the full request path deterministically.

mod helpers;

use helpers::spawn_server;
use serde_json::{json, Value};

#[tokio::test]
async fn test_name_search_runs_only_enabled_categories() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/search/name"))
        .json(&json!({
            "name": "Jane Doe",
            "options": {"social_media": false, "email": true, "phone": true, "address": false}
        }))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["query"], "Jane Doe");
    assert!(body["search_id"].is_string());
    assert!(body["timestamp"].is_string());

    let results = body["results"].as_object().expect("results object");
    let mut keys: Vec<_> = results.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["emails", "phones"]);

    // Email guesses are flagged as unverified suggestions
    let guesses = results["emails"].as_array().expect("guess list");
    assert_eq!(guesses.len(), 1);
    assert_eq!(guesses[0]["verified"], false);
    assert_eq!(
        guesses[0]["suggested_patterns"],
        json!(["jane.doe", "janedoe", "jdoe"])
    );

    // Phone search by name has no data source and stays empty
    assert_eq!(results["phones"], json!([]));
}

#[tokio::test]
async fn test_name_search_with_all_categories_disabled_is_empty() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/search/name"))
        .json(&json!({
            "name": "Jane Doe",
            "options": {"social_media": false, "email": false, "phone": false, "address": false}
        }))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["results"], json!({}));
}

#[tokio::test]
async fn test_address_category_without_credential_returns_stub() {
    // The default environment carries no geocoding key, so the address
    // category must degrade to a stub record without any outbound call
    if std::env::var("GOOGLE_MAPS_API_KEY").is_ok() {
        return;
    }

    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/search/name"))
        .json(&json!({
            "name": "221B Baker Street",
            "options": {"social_media": false, "email": false, "phone": false, "address": true}
        }))
        .send()
        .await
        .expect("request succeeds");
    let body: Value = response.json().await.expect("json body");

    let addresses = body["results"]["addresses"].as_array().expect("list");
    assert_eq!(addresses.len(), 1);
    assert!(addresses[0]["note"]
        .as_str()
        .expect("note")
        .contains("API key required"));
}

#[tokio::test]
async fn test_phone_endpoint_valid_number() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/search/phone/%2B442079460999"))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["query"], "+442079460999");
    let record = &body["results"];
    assert_eq!(record["valid"], true);
    assert_eq!(record["country"], "GB");
    assert!(record["formatted"].as_str().expect("formatted").starts_with("+44"));
}

#[tokio::test]
async fn test_phone_endpoint_invalid_number_has_no_derived_fields() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/search/phone/12345"))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let record = response.json::<Value>().await.expect("json body")["results"].clone();
    assert_eq!(record["valid"], false);
    assert_eq!(record["formatted"], Value::Null);
    assert_eq!(record["country"], Value::Null);
    assert_eq!(record["carrier"], Value::Null);
    assert_eq!(record["timezone"], json!([]));
}

#[tokio::test]
async fn test_email_endpoint_invalid_format_skips_domain_lookup() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/search/email/not-an-email"))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    let record = &body["results"];
    assert_eq!(record["valid_format"], false);
    assert_eq!(record["domain"], Value::Null);
    assert_eq!(record["domain_info"]["has_mx"], false);
    assert_eq!(record["domain_info"]["mx_records"], json!([]));
    assert_eq!(record["breach_data"], json!([]));
    assert_eq!(record["social_profiles"], json!([]));
}

#[tokio::test]
async fn test_wifi_endpoint_is_gated_by_default() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/search/wifi"))
        .json(&json!({"location": "office"}))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    // The WiFi envelope never carries a query field
    assert!(body.get("query").is_none());
    assert!(body["search_id"].is_string());

    let record = &body["results"];
    assert_eq!(record["networks"], json!([]));
    assert_eq!(record["location"], "office");
    assert!(record["note"]
        .as_str()
        .expect("note")
        .contains("not authorized"));
    assert!(record.get("error").is_none());
}

#[tokio::test]
async fn test_wifi_endpoint_accepts_missing_body() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(server.url("/api/search/wifi"))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("json body");
    assert!(body["results"].get("location").is_none());
}

#[tokio::test]
async fn test_search_ids_are_fresh_per_request() {
    let server = spawn_server().await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = client
            .get(server.url("/api/search/phone/12345"))
            .send()
            .await
            .expect("request succeeds");
        let body: Value = response.json().await.expect("json body");
        ids.push(body["search_id"].as_str().expect("id").to_string());
    }
    assert_ne!(ids[0], ids[1]);
}
