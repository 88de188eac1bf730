use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    options::{HttpMethod, RequestOptions},
    response::{ExecutionOutcome, Response},
};

/// A sent request and what came back, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Local>,
    pub url: String,
    pub method: String,
    pub command: String,
    /// Absent when curl got no response; see [`Response::status_code`].
    #[serde(default)]
    pub status_code: Option<u16>,
    pub duration_ms: f64,
    #[serde(default)]
    pub response_body: Option<String>,
    #[serde(default)]
    pub response_headers: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}

impl HistoryEntry {
    pub fn record(options: &RequestOptions, response: &Response) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: response.timestamp,
            url: options.url.clone(),
            method: options.method_label(),
            command: response.command.clone(),
            status_code: response.status_code,
            duration_ms: response.duration.as_secs_f64() * 1000.0,
            response_body: Some(response.body.clone()),
            response_headers: Some(response.headers.clone()),
            pinned: false,
        }
    }

    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// Rebuilds a response for diffing. Entries saved without a body have
    /// nothing to compare and yield `None`.
    pub fn to_response(&self) -> Option<Response> {
        let body = self.response_body.clone()?;
        Some(Response {
            timestamp: self.timestamp,
            command: self.command.clone(),
            status_code: self.status_code,
            headers: self.response_headers.clone().unwrap_or_default(),
            body,
            error_output: String::new(),
            duration: Duration::from_secs_f64(self.duration_ms.max(0.0) / 1000.0),
            success: true,
            outcome: ExecutionOutcome::Completed,
        })
    }

    /// Copies the URL and method back into `options`; everything else stays.
    pub fn apply_to(&self, options: &mut RequestOptions) {
        options.url = self.url.clone();
        match self.method.parse::<HttpMethod>() {
            Ok(method) => {
                options.method = method;
                options.custom_method.clear();
            }
            Err(_) => options.custom_method = self.method.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(body: &str) -> Response {
        Response {
            timestamp: Local::now(),
            command: "curl -X PATCH https://example.com/items/1".to_string(),
            status_code: Some(200),
            headers: "HTTP/1.1 200 OK\r\nContent-Type: application/json".to_string(),
            body: body.to_string(),
            error_output: "warning".to_string(),
            duration: Duration::from_millis(250),
            success: false,
            outcome: ExecutionOutcome::Completed,
        }
    }

    #[test]
    fn record_captures_request_and_response() {
        let options = RequestOptions::builder()
            .url("https://example.com/items/1")
            .method(HttpMethod::Patch)
            .build();
        let entry = HistoryEntry::record(&options, &response("{}"));

        assert_eq!(entry.url, "https://example.com/items/1");
        assert_eq!(entry.method, "PATCH");
        assert_eq!(entry.status_code, Some(200));
        assert_eq!(entry.duration_ms, 250.0);
        assert_eq!(entry.response_body.as_deref(), Some("{}"));
        assert!(!entry.pinned);
        assert_eq!(entry.short_id().len(), 8);
    }

    #[test]
    fn to_response_is_a_clean_success() {
        let entry = HistoryEntry::record(&RequestOptions::default(), &response("[1]"));
        let rebuilt = entry.to_response().expect("body present");

        assert!(rebuilt.success);
        assert_eq!(rebuilt.error_output, "");
        assert_eq!(rebuilt.body, "[1]");
        assert_eq!(rebuilt.status_code, Some(200));
        assert_eq!(rebuilt.duration, Duration::from_millis(250));

        let bodiless = HistoryEntry {
            response_body: None,
            ..entry
        };
        assert!(bodiless.to_response().is_none());
    }

    #[test]
    fn pinned_defaults_to_false_when_absent() {
        let json = r#"{
  "id": "6f1c1f0e-8a53-4d55-9d43-2f1f5cfc2d01",
  "timestamp": "2024-05-01T10:00:00+02:00",
  "url": "https://example.com",
  "method": "GET",
  "command": "curl https://example.com",
  "durationMs": 12.5
}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.pinned);
        assert_eq!(entry.status_code, None);
        assert_eq!(entry.response_body, None);
    }

    #[test]
    fn apply_to_restores_method_and_url() {
        let mut entry = HistoryEntry::record(&RequestOptions::default(), &response(""));
        entry.url = "https://example.com/a".to_string();
        entry.method = "delete".to_string();

        let mut options = RequestOptions::builder().custom_method("PURGE").build();
        entry.apply_to(&mut options);
        assert_eq!(options.url, "https://example.com/a");
        assert_eq!(options.method, HttpMethod::Delete);
        assert_eq!(options.custom_method, "");

        entry.method = "PURGE".to_string();
        entry.apply_to(&mut options);
        assert_eq!(options.custom_method, "PURGE");
    }
}
