//! Artifact export
//!
//! Writes a finalized artifact to the downloads directory as a local file.
//! Exporting never mutates or consumes the artifact: running it twice with
//! the same inputs produces two byte-identical files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;
use crate::session::Artifact;

/// Saves artifacts under a configured downloads directory.
pub struct FileExporter {
    downloads_dir: PathBuf,
}

/// What an export produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub path: String,
    pub bytes_written: usize,
}

impl FileExporter {
    pub fn new(downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            downloads_dir: downloads_dir.into(),
        }
    }

    /// Write the artifact bytes to `<downloads_dir>/<sanitized name>.<ext>`.
    pub async fn export(
        &self,
        artifact: &Artifact,
        suggested_name: &str,
    ) -> Result<ExportReceipt, SessionError> {
        let file_name = Self::sanitize(suggested_name, artifact.extension());
        let path = self.downloads_dir.join(file_name);

        tokio::fs::create_dir_all(&self.downloads_dir)
            .await
            .map_err(|e| {
                SessionError::Finalization(format!("failed to create downloads directory: {e}"))
            })?;

        tokio::fs::write(&path, &artifact.data).await.map_err(|e| {
            SessionError::Finalization(format!("failed to write {}: {e}", path.display()))
        })?;

        info!(
            "Exported {} bytes ({} chunks) to {}",
            artifact.data.len(),
            artifact.chunk_count,
            path.display()
        );

        Ok(ExportReceipt {
            path: path.display().to_string(),
            bytes_written: artifact.data.len(),
        })
    }

    /// Keep the suggested name filesystem-safe and give it the container's
    /// extension exactly once.
    fn sanitize(suggested: &str, extension: &str) -> String {
        let trimmed = suggested.trim();
        let stem = trimmed
            .strip_suffix(&format!(".{extension}"))
            .unwrap_or(trimmed);

        let stem: String = stem
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        let stem = stem.trim_matches('-');
        if stem.is_empty() {
            format!("recording.{extension}")
        } else {
            format!("{stem}.{extension}")
        }
    }
}
