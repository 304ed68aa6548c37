// src/lib.rs

//! Seoul public reservation digest library.
//!
//! Fetches the public service reservation listing, keeps the records that
//! match the configured areas, statuses and audiences, writes the result
//! files, and renders a plain-text daily digest from them.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
