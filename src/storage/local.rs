//! Local filesystem storage implementation.
//!
//! Files are written to a temporary sibling and renamed into place, so a
//! reader in the next pipeline step never sees a half-written file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CSV_COLUMNS, OutputConfig, ProjectedRecord, RawRecord};
use crate::pipeline::ClassifiedOutputs;
use crate::storage::{ResultStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    files: OutputConfig,
}

impl LocalStorage {
    /// Create a LocalStorage with the default file names under `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            files: OutputConfig {
                dir: root_dir.clone(),
                ..OutputConfig::default()
            },
            root_dir,
        }
    }

    /// Create a LocalStorage from output settings.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            root_dir: config.dir.clone(),
            files: config.clone(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        if let Err(e) = Self::write_then_rename(&tmp, &path, bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e.into());
        }

        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);
        tokio::fs::rename(tmp, path).await
    }

    /// Write pretty-printed JSON with non-ASCII text kept literal.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Load a JSON array of records, keeping only object entries.
    async fn read_projected(&self, key: &str) -> Result<Vec<ProjectedRecord>> {
        let path = self.path(key).display().to_string();
        let bytes = self
            .read_bytes(key)
            .await?
            .ok_or_else(|| AppError::MissingInput { path: path.clone() })?;

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::malformed(&path, e))?;
        let Value::Array(items) = value else {
            return Err(AppError::malformed(&path, "JSON root is not a list"));
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(ProjectedRecord::from_raw(&RawRecord::new(fields))),
                _ => None,
            })
            .collect())
    }
}

/// Encode the v12 summary as CSV: header row, then one row per record.
pub fn encode_summary_csv(records: &[ProjectedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

#[async_trait]
impl ResultStorage for LocalStorage {
    async fn write_outputs(&self, outputs: &ClassifiedOutputs) -> Result<WriteMetadata> {
        let now = Utc::now();
        let csv = encode_summary_csv(&outputs.v12)?;

        let files = vec![
            self.write_json(&self.files.all_file, &outputs.all).await?,
            self.write_json(&self.files.v12_file, &outputs.v12).await?,
            self.write_json(&self.files.v123_file, &outputs.v123).await?,
            self.write_bytes(&self.files.csv_file, &csv).await?,
        ];

        Ok(WriteMetadata {
            files,
            timestamp: now,
        })
    }

    async fn load_v12(&self) -> Result<Vec<ProjectedRecord>> {
        self.read_projected(&self.files.v12_file).await
    }

    async fn load_v123(&self) -> Result<Vec<ProjectedRecord>> {
        self.read_projected(&self.files.v123_file).await
    }
}
