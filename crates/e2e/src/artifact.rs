//! Artifact storage for generated tests

use std::path::PathBuf;

use specwright_common::{default_test_filename, Error, GeneratedTest, Result};
use tracing::{debug, info};

/// Writes generated tests into a single artifacts directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Provided filename if non-empty, otherwise a timestamp-derived one
    pub fn resolve_filename(&self, filename: &str) -> String {
        if filename.trim().is_empty() {
            default_test_filename(chrono::Utc::now().timestamp_millis())
        } else {
            filename.to_string()
        }
    }

    /// Write the test code and return the path written.
    ///
    /// An existing file with the same name is overwritten.
    pub async fn persist(&self, test: &GeneratedTest) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Storage(format!(
                "Failed to create artifacts directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.dir.join(self.resolve_filename(&test.filename));
        debug!("Writing {} bytes to {}", test.code.len(), path.display());

        tokio::fs::write(&path, test.code.as_bytes())
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

        info!("Saved generated test to {}", path.display());
        Ok(path)
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(specwright_common::config::DEFAULT_ARTIFACTS_DIR)
    }
}
