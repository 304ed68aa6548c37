// src/services/classifier.rs

//! Record classification into the v12 and v123 result sets.
//!
//! - (1) area is one of the watched districts
//! - (2) status is open for reservation or announced
//! - (3) target audience mentions young children, families, or no restriction
//!
//! v12 is (1) and (2); v123 adds (3), so v123 is always a subset of v12.

use crate::models::{RawRecord, fields};

/// Districts accepted by condition (1). Exact match.
pub const AREAS: [&str; 3] = ["강남구", "서초구", "송파구"];

/// Statuses accepted by condition (2). Exact match.
pub const STATUSES: [&str; 2] = ["접수중", "안내중"];

/// Keywords for condition (3). Case-sensitive substring match.
pub const TARGET_KEYWORDS: [&str; 3] = ["유아", "제한없음", "가족"];

/// Set membership of one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub in_v12: bool,
    pub in_v123: bool,
}

/// Classify a record. Missing fields read as empty and never match.
pub fn classify(record: &RawRecord) -> Classification {
    let in_v12 = matches_area(&record.text(fields::AREA))
        && matches_status(&record.text(fields::STATUS));
    let in_v123 = in_v12 && matches_target(&record.text(fields::TARGET_INFO));
    Classification { in_v12, in_v123 }
}

pub fn matches_area(area: &str) -> bool {
    AREAS.contains(&area)
}

pub fn matches_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

pub fn matches_target(target: &str) -> bool {
    !target.is_empty() && TARGET_KEYWORDS.iter().any(|k| target.contains(k))
}
