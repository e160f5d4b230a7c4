//! Phone number lookup and analysis.
//!
//! Parses and validates numbers against the international numbering plan.
//! A number that fails validation comes back with `valid: false` and no
//! derived fields. Carrier, timezone, and line-type side tables are not part
//! of the numbering-plan metadata shipped with the Rust library; those
//! fields stay null rather than being fabricated.

use serde::Serialize;

use crate::utils::sanitize_error_message;

/// One pointer into a public phone database.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicRecordNote {
    pub source: String,
    pub note: String,
}

/// Lookup record for one phone number.
#[derive(Debug, Clone, Serialize)]
pub struct PhoneRecord {
    pub phone_number: String,
    pub formatted: Option<String>,
    pub country: Option<String>,
    pub carrier: Option<String>,
    pub timezone: Vec<String>,
    pub valid: bool,
    #[serde(rename = "type")]
    pub number_type: Option<String>,
    pub public_records: Vec<PublicRecordNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhoneRecord {
    fn unvalidated(phone_number: &str) -> Self {
        PhoneRecord {
            phone_number: phone_number.to_string(),
            formatted: None,
            country: None,
            carrier: None,
            timezone: Vec::new(),
            valid: false,
            number_type: None,
            public_records: Vec::new(),
            error: None,
        }
    }
}

/// Phone number lookup adapter.
///
/// Pure computation over bundled numbering-plan metadata; no network calls.
pub struct PhoneLookup;

impl PhoneLookup {
    pub fn new() -> Self {
        PhoneLookup
    }

    /// Looks up one phone number.
    ///
    /// The number must be in international form (leading `+`) since no
    /// default region is assumed. Unparseable input sets the soft `error`
    /// field; a parseable but unassigned number is just `valid: false`.
    pub fn lookup(&self, phone_number: &str) -> PhoneRecord {
        let mut record = PhoneRecord::unvalidated(phone_number);

        match phonenumber::parse(None, phone_number) {
            Ok(parsed) => {
                if !phonenumber::is_valid(&parsed) {
                    return record;
                }
                record.valid = true;
                record.formatted = Some(
                    parsed
                        .format()
                        .mode(phonenumber::Mode::International)
                        .to_string(),
                );
                record.country = parsed.country().id().map(|id| format!("{id:?}"));
                record.public_records = vec![PublicRecordNote {
                    source: "Public Database".to_string(),
                    note: "Requires API key for full access".to_string(),
                }];
            }
            Err(e) => {
                record.error = Some(sanitize_error_message(&e.to_string()));
            }
        }

        record
    }

    /// Searches phone numbers by name. Needs paid databases; always empty.
    pub fn search_by_name(&self, _name: &str) -> Vec<PhoneRecord> {
        Vec::new()
    }
}

impl Default for PhoneLookup {
    fn default() -> Self {
        Self::new()
    }
}
