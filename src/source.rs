//! Logseq HTTP API client
//!
//! Fetches the full page list from the Logseq desktop app's local HTTP API
//! server. One blocking request per build, no retries.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::error::{LogseqError, Result};
use crate::model::Page;

/// API method returning every page in the current graph.
pub const GET_ALL_PAGES: &str = "logseq.Editor.getAllPages";

/// Anything that can produce a page snapshot for a build.
pub trait PageSource {
    fn fetch_pages(&self) -> Result<Vec<Page>>;
}

impl PageSource for Vec<Page> {
    fn fetch_pages(&self) -> Result<Vec<Page>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    method: &'a str,
}

/// Client for the Logseq local HTTP API.
pub struct LogseqApi {
    endpoint: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for LogseqApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogseqApi")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl LogseqApi {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::build(endpoint.into(), token.into(), None)
    }

    /// Client for `config`, using `token` as the bearer credential.
    pub fn from_config(config: &SourceConfig, token: &str) -> Result<Self> {
        Self::build(
            config.endpoint.clone(),
            token.to_string(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(endpoint: String, token: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| LogseqError::Config(format!("logseq http client: {err}")))?;
        Ok(Self {
            endpoint,
            token,
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn call(&self, method: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, method, "calling logseq api");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json; charset=utf-8",
            )
            .body(serde_json::to_vec(&ApiRequest { method })?)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(LogseqError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }
        Ok(body)
    }
}

impl PageSource for LogseqApi {
    fn fetch_pages(&self) -> Result<Vec<Page>> {
        let body = self.call(GET_ALL_PAGES)?;
        let pages: Option<Vec<Page>> = serde_json::from_str(&body)?;
        let pages = pages.unwrap_or_default();
        info!(
            endpoint = self.endpoint(),
            count = pages.len(),
            "fetched pages from logseq"
        );
        Ok(pages)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn api_for(server: &MockServer) -> LogseqApi {
        LogseqApi::new(server.url("/api"), "secret").unwrap()
    }

    #[test]
    fn fetches_and_decodes_pages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api")
                .header("authorization", "Bearer secret")
                .header("content-type", "application/json; charset=utf-8")
                .json_body(json!({"method": "logseq.Editor.getAllPages"}));
            then.status(200).json_body(json!([
                {
                    "id": 1,
                    "createdAt": 10,
                    "updatedAt": 20,
                    "uuid": "a",
                    "journal?": false,
                    "originalName": "Project Alpha",
                    "properties": {"tags": ["work", "urgent"]}
                },
                {
                    "id": 2,
                    "uuid": "b",
                    "journal?": true,
                    "originalName": "Jan 1st, 2024"
                }
            ]));
        });

        let pages = api_for(&server).fetch_pages().unwrap();
        mock.assert();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].tag_values(), vec!["work", "urgent"]);
        assert!(pages[1].journal);
        assert!(pages[1].properties.is_none());
    }

    #[test]
    fn null_body_is_empty_snapshot() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(200).body("null");
        });
        assert!(api_for(&server).fetch_pages().unwrap().is_empty());
    }

    #[test]
    fn error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(401).body("Access Denied!");
        });
        let err = api_for(&server).fetch_pages().unwrap_err();
        match err {
            LogseqError::HttpStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Access Denied!");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api");
            then.status(200).body("[{\"id\": \"not a number\"}]");
        });
        let err = api_for(&server).fetch_pages().unwrap_err();
        assert!(matches!(err, LogseqError::Decode(_)));
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        let api = LogseqApi::new("http://127.0.0.1:9/api", "secret").unwrap();
        let err = api.fetch_pages().unwrap_err();
        assert!(matches!(err, LogseqError::Transport(_)));
    }

    #[test]
    fn vec_source_returns_snapshot() {
        let pages = crate::test_utils::fixtures::sample_pages();
        assert_eq!(pages.fetch_pages().unwrap(), pages);
    }

    #[test]
    fn truncate_limits_long_bodies() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
