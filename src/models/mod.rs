// src/models/mod.rs

//! Domain models for the digest application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod page;
mod record;

// Re-export all public types
pub use config::{API_KEY_ENV, ApiConfig, Config, MAX_PAGE_SIZE, OutputConfig, SummaryConfig};
pub use page::{ApiResult, ListingPage};
pub use record::{CSV_COLUMNS, PROJECTED_FIELDS, ProjectedRecord, RawRecord, Scheduled, fields};

/// Every record fetched in one run, with the total the API declared.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub total_count: usize,
    pub records: Vec<RawRecord>,
}

/// Counts reported at the end of a fetch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub declared_total: usize,
    pub all_count: usize,
    pub v12_count: usize,
    pub v123_count: usize,
}
