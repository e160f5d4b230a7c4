//! Lenient results-bundle decoding.
//!
//! Report callers may resubmit any previously returned bundle, hand-edited
//! or partial, so every nested container here is optional: a missing key, a
//! `null`, or a wrong-typed value all read as absent. Decoding a bundle can
//! never fail.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A list that decodes from anything: non-arrays become empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LenientList(pub Vec<Value>);

impl LenientList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LenientList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(LenientList(items)),
            _ => Ok(LenientList(Vec::new())),
        }
    }
}

/// Decodes a field as `Some(T)` or absent, never an error.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// The `image` section carries its records one level down.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSection {
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<LenientList>,
}

/// Category containers of a results bundle, every one optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryResults {
    #[serde(default, deserialize_with = "lenient")]
    pub social_media: Option<BTreeMap<String, LenientList>>,
    #[serde(default, deserialize_with = "lenient")]
    pub emails: Option<LenientList>,
    #[serde(default, deserialize_with = "lenient")]
    pub phones: Option<LenientList>,
    #[serde(default, deserialize_with = "lenient")]
    pub addresses: Option<LenientList>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageSection>,
}

/// A caller-supplied results bundle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsBundle {
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<CategoryResults>,
}

impl ResultsBundle {
    /// Decodes a bundle from raw JSON; any undecodable shape reads as empty.
    pub fn from_value(raw: &Value) -> Self {
        ResultsBundle::deserialize(raw.clone()).unwrap_or_default()
    }

    /// The category containers, empty when the `results` key is absent.
    pub fn categories(&self) -> CategoryResults {
        self.results.clone().unwrap_or_default()
    }
}
