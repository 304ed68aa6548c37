// src/utils/http.rs

//! HTTP client and endpoint utilities.

use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Listing endpoint with the API key baked into its path.
///
/// Page URLs have the shape `{base}/{key}/json/{service}/{start}/{end}/`.
#[derive(Debug, Clone)]
pub struct ListingEndpoint {
    base: Url,
    api_key: String,
    service: String,
}

impl ListingEndpoint {
    /// Build an endpoint. Fails if the base URL cannot carry path segments.
    pub fn new(base_url: &str, api_key: &str, service: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "API base URL cannot carry a path: {base_url}"
            )));
        }
        Ok(Self {
            base,
            api_key: api_key.to_string(),
            service: service.to_string(),
        })
    }

    /// Service name, which doubles as the response wrapper key.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// URL for the inclusive, 1-based window `[start, end]`.
    pub fn page_url(&self, start: usize, end: usize) -> String {
        let (start, end) = (start.to_string(), end.to_string());
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    self.api_key.as_str(),
                    "json",
                    self.service.as_str(),
                    start.as_str(),
                    end.as_str(),
                ])
                .push("");
        }
        url.to_string()
    }
}

/// Build a detail link by appending `name=value` to `base`.
pub fn detail_link(base: &str, name: &str, value: &str) -> Option<String> {
    Url::parse_with_params(base, &[(name, value)])
        .ok()
        .map(|u| u.to_string())
}
