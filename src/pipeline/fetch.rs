// src/pipeline/fetch.rs

//! Fetch pipeline: paginate, classify, project, write.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{API_KEY_ENV, Config, FetchStats};
use crate::services::{PageFetcher, Paginator, RetryPolicy, Transport};
use crate::storage::ResultStorage;
use crate::utils::http::ListingEndpoint;

use super::project::ClassifiedOutputs;

/// Run the fetch pipeline.
///
/// The API key is resolved by the caller; a blank key fails before any
/// request is made. Nothing is written unless every page was fetched.
pub async fn run_fetch(
    config: &Config,
    api_key: &str,
    transport: &dyn Transport,
    storage: &dyn ResultStorage,
) -> Result<FetchStats> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::config(format!(
            "Missing {API_KEY_ENV} environment variable."
        )));
    }

    let start_time = Utc::now();
    let endpoint = ListingEndpoint::new(&config.api.base_url, api_key, &config.api.service)?;
    let fetcher = PageFetcher::new(transport, endpoint, RetryPolicy::from_config(&config.api));
    let listing = Paginator::new(&fetcher, config.api.page_size)
        .fetch_all()
        .await?;

    let outputs = ClassifiedOutputs::build(listing.records);
    let stats = outputs.stats(listing.total_count);

    let written = storage.write_outputs(&outputs).await?;
    log::debug!("Wrote {} files at {}", written.files.len(), written.timestamp);

    log::info!(
        "Final counts -> all: {}, v12: {}, v123: {} ({}s)",
        stats.all_count,
        stats.v12_count,
        stats.v123_count,
        (Utc::now() - start_time).num_seconds()
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PROJECTED_FIELDS;
    use crate::services::testing::{ScriptedTransport, json_reply, status_reply};
    use crate::storage::LocalStorage;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.api.base_url = "http://api.test:8088".into();
        config.api.initial_backoff_ms = 0;
        config.output.dir = dir.to_path_buf();
        config
    }

    fn read_json(path: std::path::PathBuf) -> Value {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn end_to_end_two_rows() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let storage = LocalStorage::from_config(&config.output);
        let transport = ScriptedTransport::new([json_reply(json!({
            "ListPublicReservationEducation": {
                "list_total_count": 2,
                "RESULT": { "CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다" },
                "row": [
                    {
                        "GUBUN": "자체",
                        "SVCID": "S250826000001",
                        "SVCNM": "성인 도예 교실",
                        "SVCSTATNM": "접수중",
                        "AREANM": "송파구",
                        "USETGTINFO": "성인",
                        "RCPTBGNDT": "2025-08-26 09:00:00.0"
                    },
                    {
                        "GUBUN": "자체",
                        "SVCID": "S250825000001",
                        "SVCNM": "유아 숲 체험",
                        "SVCSTATNM": "접수중",
                        "AREANM": "강남구",
                        "USETGTINFO": "유아 및 보호자",
                        "PLACENM": "양재천",
                        "RCPTBGNDT": "2025-08-25 09:00:00.0",
                        "X": "Y"
                    }
                ]
            }
        }))]);

        let stats = run_fetch(&config, "KEY", &transport, &storage)
            .await
            .unwrap();
        assert_eq!(
            stats,
            FetchStats {
                declared_total: 2,
                all_count: 2,
                v12_count: 2,
                v123_count: 1,
            }
        );
        assert_eq!(transport.requests().len(), 1);

        let v123 = read_json(tmp.path().join("seoul_education_v123.json"));
        let v123 = v123.as_array().unwrap();
        assert_eq!(v123.len(), 1);
        let keys: Vec<&str> = v123[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, PROJECTED_FIELDS.to_vec());
        assert_eq!(v123[0]["SVCID"], "S250825000001");
        assert_eq!(v123[0]["PLACENM"], "양재천");

        let all = read_json(tmp.path().join("seoul_education_all.json"));
        assert_eq!(all[0]["X"], "Y");
        assert_eq!(all[0]["GUBUN"], "자체");
        assert_eq!(all[1]["SVCID"], "S250826000001");

        let csv = std::fs::read_to_string(tmp.path().join("seoul_education_summary.csv")).unwrap();
        assert_eq!(csv.lines().count(), 3);

        let text = crate::pipeline::run_summary(&config, &storage).await.unwrap();
        assert!(text.contains("총 2건"));
        assert!(text.contains("총 1건"));
        assert!(text.contains("rsv_svc_id=S250825000001"));
    }

    #[tokio::test]
    async fn blank_key_fails_before_any_request() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let storage = LocalStorage::from_config(&config.output);
        let transport = ScriptedTransport::new([]);

        let err = run_fetch(&config, "   ", &transport, &storage)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_CONFIG);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let storage = LocalStorage::from_config(&config.output);
        let transport =
            ScriptedTransport::new([status_reply(500), status_reply(500), status_reply(500)]);

        let err = run_fetch(&config, "KEY", &transport, &storage)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_FAILURE);
        assert!(!tmp.path().join("seoul_education_all.json").exists());
    }

    #[tokio::test]
    async fn empty_listing_still_writes_empty_outputs() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let storage = LocalStorage::from_config(&config.output);
        let transport = ScriptedTransport::new([json_reply(json!({
            "RESULT": { "CODE": "INFO-200", "MESSAGE": "해당하는 데이터가 없습니다." }
        }))]);

        let stats = run_fetch(&config, "KEY", &transport, &storage)
            .await
            .unwrap();
        assert_eq!(stats, FetchStats::default());

        let v12 = read_json(tmp.path().join("seoul_education_v12.json"));
        assert_eq!(v12, json!([]));
    }
}
