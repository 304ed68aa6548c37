// src/pipeline/project.rs

//! Sorting and projection of classified records.

use chrono::NaiveDateTime;

use crate::models::{FetchStats, ProjectedRecord, RawRecord, Scheduled};
use crate::services::classify;

/// Stable ascending sort by schedule key.
///
/// Records with equal keys, including all records without a usable date,
/// keep their input order.
pub fn sort_by_schedule<T: Scheduled>(records: Vec<T>) -> Vec<T> {
    let mut keyed: Vec<(NaiveDateTime, T)> = records
        .into_iter()
        .map(|record| (record.schedule_key(), record))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// The three result sets written by a fetch run.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedOutputs {
    /// Every record, full shape, sorted
    pub all: Vec<RawRecord>,
    /// Area and status matches, projected, sorted
    pub v12: Vec<ProjectedRecord>,
    /// Area, status and target matches, projected, sorted
    pub v123: Vec<ProjectedRecord>,
}

impl ClassifiedOutputs {
    /// Sort, classify and project in one pass.
    pub fn build(records: Vec<RawRecord>) -> Self {
        let all = sort_by_schedule(records);

        let mut v12 = Vec::new();
        let mut v123 = Vec::new();
        for record in &all {
            let class = classify(record);
            if class.in_v12 {
                v12.push(ProjectedRecord::from_raw(record));
            }
            if class.in_v123 {
                v123.push(ProjectedRecord::from_raw(record));
            }
        }

        Self { all, v12, v123 }
    }

    pub fn stats(&self, declared_total: usize) -> FetchStats {
        FetchStats {
            declared_total,
            all_count: self.all.len(),
            v12_count: self.v12.len(),
            v123_count: self.v123.len(),
        }
    }
}
