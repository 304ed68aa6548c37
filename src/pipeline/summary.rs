// src/pipeline/summary.rs

//! Plain-text daily digest.
//!
//! The text is handed to whatever composes the notification email, so it
//! stays plain: a title, then one section per result set with a count and
//! up to `max_items` bullet lines.

use crate::error::Result;
use crate::models::{Config, ProjectedRecord, SummaryConfig};
use crate::storage::ResultStorage;
use crate::utils::http::detail_link;
use crate::utils::text::{PLACEHOLDER, truncate};

use super::project::sort_by_schedule;

/// Title line of the digest.
pub const TITLE: &str = "서울시 공공서비스예약 - 일일 알림";

/// Heading of the area + status section.
pub const V12_HEADING: &str = "[v12] 조건 (1)&(2)";

/// Heading of the area + status + target section.
pub const V123_HEADING: &str = "[v123] 조건 (1)&(2)&(3)";

/// Printed in place of bullets when a section has no records.
pub const NO_MATCHES: &str = "해당 조건에 맞는 항목이 없습니다.";

const SECTION_DIVIDER: &str = "-----";

/// Query parameter carrying the service id on the detail page.
const DETAIL_ID_PARAM: &str = "rsv_svc_id";

// Display widths, in graphemes.
const AREA_WIDTH: usize = 10;
const NAME_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 10;
const DATE_WIDTH: usize = 19;

/// Render the digest for the two result sets.
///
/// Never fails; empty sets render the [`NO_MATCHES`] sentence.
pub fn render_summary(
    v12: &[ProjectedRecord],
    v123: &[ProjectedRecord],
    config: &SummaryConfig,
) -> String {
    [
        TITLE.to_string(),
        String::new(),
        render_section(V12_HEADING, v12, config),
        String::new(),
        SECTION_DIVIDER.to_string(),
        String::new(),
        render_section(V123_HEADING, v123, config),
    ]
    .join("\n")
}

fn render_section(heading: &str, records: &[ProjectedRecord], config: &SummaryConfig) -> String {
    let mut lines = vec![
        heading.to_string(),
        String::new(),
        format!("총 {}건", records.len()),
        String::new(),
    ];

    if records.is_empty() {
        lines.push(NO_MATCHES.to_string());
        return lines.join("\n");
    }

    // Inputs are normally pre-sorted, but that is not guaranteed.
    let sorted = sort_by_schedule(records.to_vec());
    lines.extend(
        sorted
            .iter()
            .take(config.max_items)
            .map(|record| bullet_line(record, &config.detail_url)),
    );
    lines.join("\n")
}

/// One bullet: area, name, status, reservation window, detail link.
pub fn bullet_line(record: &ProjectedRecord, detail_url: &str) -> String {
    let link = if record.service_id.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        detail_link(detail_url, DETAIL_ID_PARAM, &record.service_id)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    };

    format!(
        "- [{}] {} ({}) | 접수: {} ~ {} | 링크: {}",
        truncate(&record.area, AREA_WIDTH),
        truncate(&record.service_name, NAME_WIDTH),
        truncate(&record.status, STATUS_WIDTH),
        truncate(&record.reservation_begin, DATE_WIDTH),
        truncate(&record.reservation_end, DATE_WIDTH),
        link
    )
}

/// Load both result sets from storage and render the digest.
pub async fn run_summary(config: &Config, storage: &dyn ResultStorage) -> Result<String> {
    let v12 = storage.load_v12().await?;
    let v123 = storage.load_v123().await?;
    log::info!(
        "Loaded {} v12 and {} v123 records for the summary",
        v12.len(),
        v123.len()
    );
    Ok(render_summary(&v12, &v123, &config.summary))
}
