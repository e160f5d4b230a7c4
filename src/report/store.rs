//! Flat report storage.
//!
//! One JSON file per report under the configured directory. Writes are
//! create-only (a report is never updated in place) and reads are of
//! immutable files, so no locking is needed. Ids are validated as UUIDs
//! before any path is formed; nothing caller-controlled ever reaches the
//! filesystem layer.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error_handling::InitializationError;
use crate::report::builder::Report;

/// Keyed, create-only store of generated reports.
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Opens the store, creating the reports directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ReportsDirError` if the directory
    /// cannot be created.
    pub async fn open(dir: &Path) -> Result<Self, InitializationError> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            InitializationError::ReportsDirError(format!(
                "cannot create {}: {e}",
                dir.display()
            ))
        })?;
        Ok(ReportStore {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, report_id: Uuid) -> PathBuf {
        self.dir.join(format!("{report_id}.json"))
    }

    /// Persists a report under its id.
    ///
    /// Create-only: an existing file for the same id is an error rather
    /// than an overwrite.
    pub async fn save(&self, report: &Report) -> Result<()> {
        let path = self.path_for(report.report_id);
        let body = serde_json::to_vec_pretty(report).context("serializing report")?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(&body)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        file.flush().await.context("flushing report file")?;

        log::info!("Report {} saved to {}", report.report_id, path.display());
        Ok(())
    }

    /// Loads a report by id string.
    ///
    /// Returns `None` for ids that are not UUIDs (these can never have been
    /// issued) and for ids with no stored file.
    pub async fn load(&self, report_id: &str) -> Result<Option<Report>> {
        let Ok(id) = Uuid::parse_str(report_id) else {
            return Ok(None);
        };

        let path = self.path_for(id);
        let body = match tokio::fs::read(&path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };

        let report: Report = serde_json::from_slice(&body)
            .with_context(|| format!("decoding {}", path.display()))?;
        Ok(Some(report))
    }
}
