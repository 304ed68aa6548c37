//! Storage abstractions for fetch results.
//!
//! Every run overwrites the same four files:
//!
//! ```text
//! {output.dir}/
//! ├── seoul_education_all.json       # Every record, full shape
//! ├── seoul_education_v12.json       # Area + status matches, projected
//! ├── seoul_education_v123.json      # Area + status + target matches, projected
//! └── seoul_education_summary.csv    # v12 flattened to eight columns
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::ProjectedRecord;
use crate::pipeline::ClassifiedOutputs;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Files written, in write order
    pub files: Vec<PathBuf>,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for result storage backends.
#[async_trait]
pub trait ResultStorage: Send + Sync {
    /// Write the JSON and CSV artifacts of one fetch run.
    async fn write_outputs(&self, outputs: &ClassifiedOutputs) -> Result<WriteMetadata>;

    /// Load the area + status result set.
    async fn load_v12(&self) -> Result<Vec<ProjectedRecord>>;

    /// Load the area + status + target result set.
    async fn load_v123(&self) -> Result<Vec<ProjectedRecord>>;
}
