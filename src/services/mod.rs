// src/services/mod.rs

//! Listing services: fetching, pagination, and classification.

pub mod classifier;
pub mod fetcher;
pub mod paginator;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{Classification, classify};
pub use fetcher::{HttpReply, PageFetcher, ReqwestTransport, RetryPolicy, Transport, TransportError};
pub use paginator::Paginator;
