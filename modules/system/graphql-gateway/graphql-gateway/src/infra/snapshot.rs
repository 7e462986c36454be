//! Snapshot file of the printed composite schema.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

/// Overwrites one file with the printed composite after each composition.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` through a temp file so readers never see a partial snapshot.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the file
    /// cannot be written or renamed.
    pub async fn write(&self, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating snapshot directory {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, contents)
            .await
            .with_context(|| format!("writing {}", temp_path.display()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("replacing snapshot {}", self.path.display()))?;

        debug!(path = %self.path.display(), bytes = contents.len(), "Schema snapshot written");
        Ok(())
    }
}
