//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Largest window the listing API serves in one request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Environment variable holding the listing API key.
pub const API_KEY_ENV: &str = "SEOUL_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing API and HTTP behavior settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Plain-text digest settings
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if self.api.service.trim().is_empty() {
            return Err(AppError::validation("api.service is empty"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "api.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.api.max_attempts == 0 {
            return Err(AppError::validation("api.max_attempts must be > 0"));
        }
        let files = [
            &self.output.all_file,
            &self.output.v12_file,
            &self.output.v123_file,
            &self.output.csv_file,
        ];
        if files.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::validation("output file names must not be empty"));
        }
        if self.summary.max_items == 0 {
            return Err(AppError::validation("summary.max_items must be > 0"));
        }
        if url::Url::parse(&self.summary.detail_url).is_err() {
            return Err(AppError::validation("summary.detail_url is not a valid URL"));
        }
        Ok(())
    }
}

/// Listing API and HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the open data API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Service name in the request path and response wrapper
    #[serde(default = "defaults::service")]
    pub service: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Records requested per page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Total attempts per page, including the first
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles for each further retry
    #[serde(default = "defaults::initial_backoff")]
    pub initial_backoff_ms: u64,
}

impl ApiConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            service: defaults::service(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            max_attempts: defaults::max_attempts(),
            initial_backoff_ms: defaults::initial_backoff(),
        }
    }
}

/// Output file settings. File names are relative to `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,

    /// Every fetched record, full shape
    #[serde(default = "defaults::all_file")]
    pub all_file: String,

    /// Records matching area and status
    #[serde(default = "defaults::v12_file")]
    pub v12_file: String,

    /// Records matching area, status and target keywords
    #[serde(default = "defaults::v123_file")]
    pub v123_file: String,

    /// CSV flattening of the area and status matches
    #[serde(default = "defaults::csv_file")]
    pub csv_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            all_file: defaults::all_file(),
            v12_file: defaults::v12_file(),
            v123_file: defaults::v123_file(),
            csv_file: defaults::csv_file(),
        }
    }
}

/// Plain-text digest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Bullet lines per section
    #[serde(default = "defaults::max_items")]
    pub max_items: usize,

    /// Reservation detail page; the service id is appended as `rsv_svc_id`
    #[serde(default = "defaults::detail_url")]
    pub detail_url: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_items: defaults::max_items(),
            detail_url: defaults::detail_url(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // API defaults
    pub fn base_url() -> String {
        "http://openapi.seoul.go.kr:8088".into()
    }
    pub fn service() -> String {
        "ListPublicReservationEducation".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; yeyak/0.1)".into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn page_size() -> usize {
        super::MAX_PAGE_SIZE
    }
    pub fn max_attempts() -> u32 {
        3
    }
    pub fn initial_backoff() -> u64 {
        1000
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from(".")
    }
    pub fn all_file() -> String {
        "seoul_education_all.json".into()
    }
    pub fn v12_file() -> String {
        "seoul_education_v12.json".into()
    }
    pub fn v123_file() -> String {
        "seoul_education_v123.json".into()
    }
    pub fn csv_file() -> String {
        "seoul_education_summary.csv".into()
    }

    // Summary defaults
    pub fn max_items() -> usize {
        10
    }
    pub fn detail_url() -> String {
        "https://yeyak.seoul.go.kr/web/reservation/selectReservView.do".into()
    }
}
