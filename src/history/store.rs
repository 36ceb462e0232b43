//! Result artifact persistence.
//!
//! Each fetch writes `<address>_<unixMillis>.json` into the output directory.
//! Files are never read back or pruned.

use serde_json::Value;
use solana_pubkey::Pubkey;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::history::types::StoreError;

/// A written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub filename: String,
    pub path: PathBuf,
}

/// Writes fetch results to a directory.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact name for `address` captured at `millis`.
    pub fn filename_for(address: &Pubkey, millis: u128) -> String {
        format!("{}_{}.json", address, millis)
    }

    /// Write `records` as pretty-printed JSON, creating the directory if needed.
    pub async fn persist(&self, address: &Pubkey, records: &[Value]) -> Result<StoredArtifact, StoreError> {
        let filename = Self::filename_for(address, unix_millis());

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let body = serde_json::to_string_pretty(records)?;
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), records = records.len(), "Result artifact written");
        Ok(StoredArtifact { filename, path })
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
