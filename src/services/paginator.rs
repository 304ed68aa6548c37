// src/services/paginator.rs

//! Pagination over the listing API.

use crate::error::Result;
use crate::models::Listing;

use super::fetcher::PageFetcher;

/// Walks the listing window by window until the declared total is covered.
pub struct Paginator<'a> {
    fetcher: &'a PageFetcher<'a>,
    page_size: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(fetcher: &'a PageFetcher<'a>, page_size: usize) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
        }
    }

    /// Fetch every record.
    ///
    /// The total declared by the first page is authoritative. Fetching stops
    /// once that many records have arrived, the last window has been
    /// requested, or a page comes back empty. Any page failure aborts the
    /// whole run and discards what was collected.
    pub async fn fetch_all(&self) -> Result<Listing> {
        let mut end = self.page_size;
        let first = self.fetcher.fetch_page(1, end).await?;
        log::info!("Fetched page: 1-{} -> {} rows", end, first.rows.len());

        let total_count = first.total_count;
        if total_count == 0 {
            log::info!("Discovered total count: 0, nothing to fetch");
            return Ok(Listing::default());
        }
        log::info!("Discovered total count: {}", total_count);

        let mut records = first.rows;
        let mut last_page_empty = records.is_empty();

        while records.len() < total_count && end < total_count && !last_page_empty {
            let start = end + 1;
            end = (end + self.page_size).min(total_count);

            let page = self.fetcher.fetch_page(start, end).await?;
            log::info!("Fetched page: {}-{} -> {} rows", start, end, page.rows.len());

            last_page_empty = page.is_empty();
            records.extend(page.rows);
        }

        if records.len() < total_count {
            log::warn!(
                "Declared total {} but received {} records",
                total_count,
                records.len()
            );
        }

        Ok(Listing {
            total_count,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::AppError;
    use crate::services::fetcher::RetryPolicy;
    use crate::services::testing::{ScriptedTransport, json_reply, status_reply, test_endpoint};
    use serde_json::{Value, json};

    fn no_wait() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::ZERO,
        }
    }

    fn rows(range: std::ops::Range<usize>) -> Value {
        Value::Array(range.map(|i| json!({ "SVCID": format!("S{i}") })).collect())
    }

    fn page(total: usize, rows: Value) -> Value {
        json!({ "ListPublicReservationEducation": { "list_total_count": total, "row": rows } })
    }

    fn window(start: usize, end: usize) -> String {
        format!("http://api.test:8088/KEY/json/ListPublicReservationEducation/{start}/{end}/")
    }

    #[tokio::test]
    async fn single_page_covers_total() {
        let transport = ScriptedTransport::new([json_reply(page(2, rows(0..2)))]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let listing = Paginator::new(&fetcher, 1000).fetch_all().await.unwrap();
        assert_eq!(listing.total_count, 2);
        assert_eq!(listing.records.len(), 2);
        assert_eq!(transport.requests(), vec![window(1, 1000)]);
    }

    #[tokio::test]
    async fn total_of_1500_takes_exactly_two_requests() {
        let transport = ScriptedTransport::new([
            json_reply(page(1500, rows(0..1000))),
            json_reply(page(1500, rows(1000..1500))),
        ]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let listing = Paginator::new(&fetcher, 1000).fetch_all().await.unwrap();
        assert_eq!(listing.records.len(), 1500);
        assert_eq!(listing.records[1000].text("SVCID"), "S1000");
        assert_eq!(
            transport.requests(),
            vec![window(1, 1000), window(1001, 1500)]
        );
    }

    #[tokio::test]
    async fn zero_total_stops_immediately() {
        let transport = ScriptedTransport::new([json_reply(page(0, json!([])))]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let listing = Paginator::new(&fetcher, 1000).fetch_all().await.unwrap();
        assert_eq!(listing.total_count, 0);
        assert!(listing.records.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_stops_before_total() {
        let transport = ScriptedTransport::new([
            json_reply(page(5000, rows(0..1000))),
            json_reply(page(5000, json!([]))),
        ]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let listing = Paginator::new(&fetcher, 1000).fetch_all().await.unwrap();
        assert_eq!(listing.total_count, 5000);
        assert_eq!(listing.records.len(), 1000);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn later_totals_are_ignored() {
        let transport = ScriptedTransport::new([
            json_reply(page(3, rows(0..2))),
            json_reply(page(999, rows(2..3))),
        ]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let listing = Paginator::new(&fetcher, 2).fetch_all().await.unwrap();
        assert_eq!(listing.total_count, 3);
        assert_eq!(listing.records.len(), 3);
        assert_eq!(transport.requests(), vec![window(1, 2), window(3, 3)]);
    }

    #[tokio::test]
    async fn failure_on_later_page_aborts_run() {
        let transport = ScriptedTransport::new([
            json_reply(page(2000, rows(0..1000))),
            status_reply(500),
            status_reply(500),
            status_reply(500),
        ]);
        let fetcher = PageFetcher::new(&transport, test_endpoint(), no_wait());

        let err = Paginator::new(&fetcher, 1000).fetch_all().await.unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
        assert_eq!(transport.requests().len(), 4);
    }
}
