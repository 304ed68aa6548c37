//! Pipeline entry points.
//!
//! - `run_fetch`: Fetch every listing page, classify, and write the result files
//! - `run_summary`: Render the plain-text digest from the written result files

pub mod fetch;
pub mod project;
pub mod summary;

pub use fetch::run_fetch;
pub use project::{ClassifiedOutputs, sort_by_schedule};
pub use summary::{render_summary, run_summary};
