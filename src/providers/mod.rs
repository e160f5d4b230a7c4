//! Lookup provider adapters.
//!
//! One adapter per information category, each wrapping one external source
//! behind a uniform lookup contract. Adapters never return errors to their
//! callers: every failure (network error, missing credential, invalid input)
//! is folded into the returned record as an `error` or `note` field, so one
//! failing provider never aborts a batch.
//!
//! Adapters are constructed once at startup and injected into the aggregator
//! and HTTP handlers; there is no ambient global state.

mod address;
mod email;
mod image;
mod phone;
mod social;
mod wifi;

use std::sync::Arc;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::config::Config;
use crate::error_handling::{InitializationError, ProviderStats};
use crate::initialization::{init_client, init_probe_client, init_resolver};
use crate::utils::sanitize_error_message;

pub use address::{AddressLookup, AddressRecord, LatLng};
pub use email::{DomainInfo, EmailGuess, EmailLookup, EmailRecord};
pub use image::{EngineStub, ImageResults, ImageSearch};
pub use phone::{PhoneLookup, PhoneRecord, PublicRecordNote};
pub use social::{SocialProfile, SocialResults, SocialSearch};
pub use wifi::{ScanPlatform, WifiNetwork, WifiScanRecord, WifiScanner};

/// Information categories served by the providers.
///
/// The serialized form doubles as the category key in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Category {
    #[strum(serialize = "social_media")]
    SocialMedia,
    #[strum(serialize = "emails")]
    Emails,
    #[strum(serialize = "phones")]
    Phones,
    #[strum(serialize = "addresses")]
    Addresses,
    #[strum(serialize = "image")]
    Image,
    #[strum(serialize = "wifi")]
    Wifi,
}

/// A provider failure folded into a normal result value.
#[derive(Debug, Clone, Serialize)]
pub struct SoftError {
    /// Sanitized failure description.
    pub error: String,
}

impl SoftError {
    /// Creates a soft error with a sanitized message.
    pub fn new(message: &str) -> Self {
        SoftError {
            error: sanitize_error_message(message),
        }
    }
}

/// All provider adapters, constructed once at startup.
pub struct Providers {
    pub social: SocialSearch,
    pub email: EmailLookup,
    pub phone: PhoneLookup,
    pub address: AddressLookup,
    pub image: ImageSearch,
    pub wifi: WifiScanner,
    /// Counters for absorbed provider failures.
    pub stats: Arc<ProviderStats>,
}

impl Providers {
    /// Builds every adapter from the configuration and shared resources.
    ///
    /// The Google Maps credential is read from `GOOGLE_MAPS_API_KEY`; without
    /// it the address adapter degrades to stub records.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError` if an HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let probe_client = init_probe_client(config)?;
        let resolver = init_resolver();
        let stats = Arc::new(ProviderStats::new());

        let geocoding_key = std::env::var("GOOGLE_MAPS_API_KEY").ok();
        if geocoding_key.is_none() {
            log::info!("GOOGLE_MAPS_API_KEY not set; address lookups will return stub records");
        }

        Ok(Providers {
            social: SocialSearch::new(client.clone(), probe_client, stats.clone()),
            email: EmailLookup::new(resolver, stats.clone()),
            phone: PhoneLookup::new(),
            address: AddressLookup::new(client, geocoding_key, stats.clone()),
            image: ImageSearch::new(),
            wifi: WifiScanner::new(
                ScanPlatform::detect(),
                config.enable_wifi_scan,
                stats.clone(),
            ),
            stats,
        })
    }
}
