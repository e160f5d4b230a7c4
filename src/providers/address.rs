//! Address and location lookup.
//!
//! Resolves free-text queries through the Google Geocoding API when a
//! credential is configured; without one every query returns a single stub
//! record explaining the limitation. A query that parses as a `lat,lng`
//! pair is reverse-resolved to an address instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::GEOCODE_RESULT_LIMIT;
use crate::error_handling::ProviderStats;
use crate::providers::Category;
use crate::utils::sanitize_error_message;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One record in an address search result list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AddressRecord {
    /// A geocoding candidate.
    Candidate {
        formatted_address: Option<String>,
        location: Option<LatLng>,
        place_id: Option<String>,
        types: Vec<String>,
    },
    /// A reverse-geocoded coordinate pair.
    Reverse {
        coordinates: LatLng,
        address: Option<String>,
    },
    /// Credential missing; manual lookup required.
    Stub { note: String, name: String },
    /// The geocoding service could not be reached.
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

/// Address lookup adapter.
pub struct AddressLookup {
    client: Arc<reqwest::Client>,
    api_key: Option<String>,
    stats: Arc<ProviderStats>,
}

impl AddressLookup {
    pub fn new(
        client: Arc<reqwest::Client>,
        api_key: Option<String>,
        stats: Arc<ProviderStats>,
    ) -> Self {
        AddressLookup {
            client,
            api_key,
            stats,
        }
    }

    /// Searches addresses for a free-text query.
    ///
    /// Returns up to `GEOCODE_RESULT_LIMIT` candidates, a single reverse
    /// lookup when the query is a coordinate pair, a stub record when no
    /// credential is configured, or a soft error record on failure.
    pub async fn search_by_name(&self, name: &str) -> Vec<AddressRecord> {
        let Some(api_key) = self.api_key.clone() else {
            return vec![AddressRecord::Stub {
                note: "Google Maps API key required for address lookup".to_string(),
                name: name.to_string(),
            }];
        };

        if let Some(coordinates) = parse_lat_lng(name) {
            return vec![self.reverse_geocode(coordinates, &api_key).await];
        }

        match self.geocode_request(&[("address", name)], &api_key).await {
            Ok(response) => response
                .results
                .into_iter()
                .take(GEOCODE_RESULT_LIMIT)
                .map(|candidate| AddressRecord::Candidate {
                    formatted_address: candidate.formatted_address,
                    location: candidate.geometry.and_then(|g| g.location),
                    place_id: candidate.place_id,
                    types: candidate.types,
                })
                .collect(),
            Err(message) => {
                self.stats.record_soft_failure(Category::Addresses);
                vec![AddressRecord::Failed { error: message }]
            }
        }
    }

    /// Reverse-geocodes a coordinate pair to its closest address.
    async fn reverse_geocode(&self, coordinates: LatLng, api_key: &str) -> AddressRecord {
        let latlng = format!("{},{}", coordinates.lat, coordinates.lng);
        match self.geocode_request(&[("latlng", latlng.as_str())], api_key).await {
            Ok(response) => AddressRecord::Reverse {
                coordinates,
                address: response
                    .results
                    .into_iter()
                    .next()
                    .and_then(|candidate| candidate.formatted_address),
            },
            Err(message) => {
                self.stats.record_soft_failure(Category::Addresses);
                AddressRecord::Failed { error: message }
            }
        }
    }

    /// Issues one geocoding API request and decodes the response.
    ///
    /// A non-OK API status (over quota, denied) is reported the same way as
    /// a transport failure.
    async fn geocode_request(
        &self,
        params: &[(&str, &str)],
        api_key: &str,
    ) -> Result<GeocodeResponse, String> {
        let response = self
            .client
            .get(GEOCODE_URL)
            .query(params)
            .query(&[("key", api_key)])
            .send()
            .await
            .map_err(|e| {
                log::warn!("Geocoding request failed: {e}");
                sanitize_error_message(&e.to_string())
            })?;

        let decoded: GeocodeResponse = response.json().await.map_err(|e| {
            log::warn!("Geocoding response was undecodable: {e}");
            sanitize_error_message(&e.to_string())
        })?;

        match decoded.status.as_deref() {
            // ZERO_RESULTS is a clean empty answer, not a failure
            Some("OK") | Some("ZERO_RESULTS") | None => Ok(decoded),
            Some(status) => {
                let detail = decoded.error_message.unwrap_or_default();
                log::warn!("Geocoding API returned status {status}: {detail}");
                Err(sanitize_error_message(&format!(
                    "Geocoding API status {status}"
                )))
            }
        }
    }
}

/// Parses `"lat,lng"` with both halves in valid coordinate range.
fn parse_lat_lng(input: &str) -> Option<LatLng> {
    let (lat_part, lng_part) = input.split_once(',')?;
    let lat: f64 = lat_part.trim().parse().ok()?;
    let lng: f64 = lng_part.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some(LatLng { lat, lng })
}
