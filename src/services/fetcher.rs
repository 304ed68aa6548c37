// src/services/fetcher.rs

//! Page fetcher with bounded retry.
//!
//! One call fetches one window of the listing. Connection-level failures,
//! timeouts, 5xx responses and undecodable bodies are retried with
//! exponential backoff; anything else fails the page immediately.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, ApiResult, ListingPage};
use crate::utils::http::{ListingEndpoint, create_async_client};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Failure below the HTTP status level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Connection errors and timeouts are worth another attempt
    pub retryable: bool,
    pub message: String,
}

impl TransportError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            retryable: true,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            retryable: false,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let retryable = e.is_connect() || e.is_timeout() || e.is_request() || e.is_body();
        // The request URL carries the API key in its path.
        Self {
            retryable,
            message: e.without_url().to_string(),
        }
    }
}

/// Issues GET requests for the fetcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the configured user agent and timeout.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

/// Attempt cap and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait before the first retry; doubled for each one after
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff(),
        }
    }

    /// Delay after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(31);
        self.initial_backoff.saturating_mul(1 << doublings)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ApiConfig::default())
    }
}

/// What a single attempt produced.
enum Attempt {
    Decoded(Value),
    Transient(String),
    Terminal(String),
}

/// Fetches one listing window at a time.
pub struct PageFetcher<'a> {
    transport: &'a dyn Transport,
    endpoint: ListingEndpoint,
    retry: RetryPolicy,
}

impl<'a> PageFetcher<'a> {
    pub fn new(transport: &'a dyn Transport, endpoint: ListingEndpoint, retry: RetryPolicy) -> Self {
        Self {
            transport,
            endpoint,
            retry,
        }
    }

    /// Fetch the inclusive, 1-based window `[start, end]`.
    ///
    /// A response without the wrapper or without rows is an empty page, not
    /// an error.
    pub async fn fetch_page(&self, start: usize, end: usize) -> Result<ListingPage> {
        let context = format!("{} {}-{}", self.endpoint.service(), start, end);
        let url = self.endpoint.page_url(start, end);
        let body = self.fetch_json(&url, &context).await?;

        let page = ListingPage::from_json(&body, self.endpoint.service());
        if page.is_empty() {
            if let Some(result) = ApiResult::from_json(&body) {
                log::debug!(
                    "No rows for {}: {} {}",
                    context,
                    result.code,
                    result.message
                );
            }
        }
        Ok(page)
    }

    async fn fetch_json(&self, url: &str, context: &str) -> Result<Value> {
        let max_attempts = self.retry.max_attempts;
        let mut last_cause = String::new();

        for attempt in 1..=max_attempts {
            match self.attempt(url).await {
                Attempt::Decoded(body) => return Ok(body),
                Attempt::Terminal(cause) => return Err(AppError::fetch(context, cause)),
                Attempt::Transient(cause) => {
                    if attempt < max_attempts {
                        let delay = self.retry.delay_after(attempt);
                        log::warn!(
                            "Attempt {}/{} for {} failed: {}. Retrying in {:?}",
                            attempt,
                            max_attempts,
                            context,
                            cause,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_cause = cause;
                }
            }
        }

        Err(AppError::fetch(
            context,
            format!("giving up after {max_attempts} attempts: {last_cause}"),
        ))
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let reply = match self.transport.get(url).await {
            Ok(reply) => reply,
            Err(e) if e.retryable => return Attempt::Transient(e.message),
            Err(e) => return Attempt::Terminal(e.message),
        };

        match reply.status {
            200..=299 => match serde_json::from_str(&reply.body) {
                Ok(body) => Attempt::Decoded(body),
                Err(e) => Attempt::Transient(format!("invalid JSON body: {e}")),
            },
            500..=599 => Attempt::Transient(format!("server error {}", reply.status)),
            status => Attempt::Terminal(format!("HTTP {status}")),
        }
    }
}
