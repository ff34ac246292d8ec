use crate::config::Settings;
use crate::ingest::{DocumentError, DocumentSource};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use std::time::Duration;

/// Fetches documents over HTTP, bypassing every cache between us and the origin.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDocumentSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_data_base_url()?.to_string();
        Self::new(base_url, Duration::from_secs(settings.http_timeout_secs))
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(no_cache_headers())
            .build()
            .context("failed to build document http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

#[async_trait::async_trait]
impl DocumentSource for HttpDocumentSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, DocumentError> {
        let url = self.url(path);
        // Cache-buster for intermediaries that ignore Cache-Control.
        let stamp = chrono::Utc::now().timestamp_millis().to_string();

        let res = self
            .http
            .get(&url)
            .query(&[("_", stamp)])
            .send()
            .await
            .map_err(|e| DocumentError::transport(path, &e))?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "document fetch returned non-success status");
            return Err(DocumentError::status(path, status));
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| DocumentError::transport(path, &e))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{load_dashboard, DocumentPaths};
    use httpmock::prelude::*;
    use httpmock::MockServer;
    use serde_json::json;

    fn source(server: &MockServer) -> HttpDocumentSource {
        HttpDocumentSource::new(server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn paths() -> DocumentPaths {
        DocumentPaths {
            latest: "data/latest.json".to_string(),
            history: "data/history.json".to_string(),
        }
    }

    #[test]
    fn url_joins_base_and_path() {
        let s = HttpDocumentSource::new("https://example.org/site/", Duration::from_secs(1)).unwrap();
        assert_eq!(s.url("data/latest.json"), "https://example.org/site/data/latest.json");
        assert_eq!(s.url("/data/latest.json"), "https://example.org/site/data/latest.json");
        assert_eq!(s.url("https://cdn.example.org/x.json"), "https://cdn.example.org/x.json");
    }

    #[tokio::test]
    async fn fetch_sends_no_cache_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/data/latest.json")
                    .header("cache-control", "no-cache, no-store")
                    .header("pragma", "no-cache")
                    .query_param_exists("_");
                then.status(200).json_body(json!({"market_health_pct": 45}));
            })
            .await;

        let body = source(&server).fetch("data/latest.json").await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["market_health_pct"], 45);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_load_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/latest.json");
                then.status(200).json_body(json!({}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/history.json");
                then.status(503);
            })
            .await;

        let err = load_dashboard(&source(&server), &paths()).await.unwrap_err();
        assert!(err.is_load());
        assert_eq!(err.path(), "data/history.json");
        match err {
            DocumentError::Load { status, .. } => assert_eq!(status, Some(503)),
            DocumentError::Parse { .. } => panic!("expected load error"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/latest.json");
                then.status(200).body("not json");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/history.json");
                then.status(200).json_body(json!([]));
            })
            .await;

        let err = load_dashboard(&source(&server), &paths()).await.unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.path(), "data/latest.json");
    }

    #[tokio::test]
    async fn loads_documents_end_to_end() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/latest.json");
                then.status(200)
                    .json_body(json!({"date_pretty": "12 Jun", "market_health_pct": 45}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/data/history.json");
                then.status(200).json_body(json!([
                    {"dt": "10 Jun", "pct_above_50": 38, "green_prob_5d": 60},
                    {"dt": "11 Jun", "pct_above_50": 42, "green_prob_5d": 65}
                ]));
            })
            .await;

        let (snapshot, history) = load_dashboard(&source(&server), &paths()).await.unwrap();
        assert_eq!(snapshot.date_pretty.as_deref(), Some("12 Jun"));
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].dt, "11 Jun");
    }
}
