//! HTTP client for an nflverse JSON feed.
//!
//! The feed exposes three tables as JSON arrays of flat row objects:
//! `{base}/weekly/{season}`, `{base}/schedules/{season}` and
//! `{base}/rosters/{season}`.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, SourceError};

pub struct NflverseClient {
    http: HttpClient,
    base_url: Url,
}

impl NflverseClient {
    /// Create a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one table as raw rows.
    pub async fn rows(&self, table: &str, season: i32) -> Result<Vec<Value>, SourceError> {
        let url = self
            .base_url
            .join(&format!("{table}/{season}"))
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        debug!(url = %url, "Fetching feed table");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        match response.json::<Value>().await? {
            Value::Array(rows) => Ok(rows),
            Value::Object(mut body) => match body.remove("data") {
                Some(Value::Array(rows)) => Ok(rows),
                _ => Err(SourceError::Payload {
                    endpoint: url.to_string(),
                    reason: "expected a JSON array or {\"data\": [...]}".into(),
                }),
            },
            other => Err(SourceError::Payload {
                endpoint: url.to_string(),
                reason: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
