//! Utility functions and helpers.

pub mod date;
pub mod env;
pub mod http;
pub mod text;
