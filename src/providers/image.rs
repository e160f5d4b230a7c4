//! Reverse image search.
//!
//! No engine allows unauthenticated automated reverse search, so each target
//! engine gets a stub record pointing at its manual search page. The
//! uploaded image itself is never sent anywhere; the caller holds it in a
//! scoped temp file that is deleted when the request ends.

use std::path::Path;

use serde::Serialize;

/// A manual-search pointer for one engine.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EngineStub {
    pub platform: String,
    pub search_url: String,
    pub note: String,
}

impl EngineStub {
    fn new(platform: &str, search_url: &str, note: &str) -> Self {
        EngineStub {
            platform: platform.to_string(),
            search_url: search_url.to_string(),
            note: note.to_string(),
        }
    }
}

/// Per-engine stub lists, in fixed engine order.
#[derive(Debug, Clone, Serialize)]
pub struct ImageResults {
    pub google: Vec<EngineStub>,
    pub tineye: Vec<EngineStub>,
    pub yandex: Vec<EngineStub>,
}

/// Reverse image search adapter.
pub struct ImageSearch;

impl ImageSearch {
    pub fn new() -> Self {
        ImageSearch
    }

    /// Produces manual-search stubs for the three target engines.
    ///
    /// The image path is accepted to prove the payload was spooled to a
    /// scoped file, but its bytes are never read or transmitted.
    pub fn reverse_search(&self, _image: &Path) -> ImageResults {
        ImageResults {
            google: vec![EngineStub::new(
                "Google Images",
                "https://www.google.com/searchbyimage",
                "Upload image manually or use API key for automated search",
            )],
            tineye: vec![EngineStub::new(
                "TinEye",
                "https://www.tineye.com/",
                "Upload image manually or use API key for automated search",
            )],
            yandex: vec![EngineStub::new(
                "Yandex Images",
                "https://yandex.com/images/search",
                "Upload image manually for reverse search",
            )],
        }
    }
}

impl Default for ImageSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_engine_gets_one_stub() {
        let adapter = ImageSearch::new();
        let results = adapter.reverse_search(Path::new("/tmp/ignored.png"));
        assert_eq!(results.google.len(), 1);
        assert_eq!(results.tineye.len(), 1);
        assert_eq!(results.yandex.len(), 1);
        assert_eq!(results.google[0].platform, "Google Images");
        assert!(results.yandex[0].search_url.contains("yandex.com"));
    }
}
