use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::Value;

/// How an invocation ended, independent of the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed,
    Cancelled,
    SpawnFailed,
}

/// One finished invocation, whatever the way it finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub timestamp: DateTime<Local>,
    pub command: String,
    /// `None` when no response arrived (curl's `000`), the sentinel was
    /// missing, or the run was cancelled. Never `Some(0)`.
    pub status_code: Option<u16>,
    /// Raw header block, CRLF separated, empty when headers were not captured.
    pub headers: String,
    pub body: String,
    pub error_output: String,
    pub duration: Duration,
    /// True only for a completed process that exited with status 0.
    pub success: bool,
    pub outcome: ExecutionOutcome,
}

impl Response {
    pub fn status_text(&self) -> String {
        let Some(code) = self.status_code else {
            return "Error".to_string();
        };
        match reason_phrase(code) {
            Some(reason) => format!("{code} {reason}"),
            None => code.to_string(),
        }
    }

    pub fn formatted_duration(&self) -> String {
        format!("{:.2} ms", self.duration.as_secs_f64() * 1000.0)
    }

    /// Header lines as `(name, value)`; lines without a colon keep an empty value.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        self.headers
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(|line| match line.split_once(':') {
                Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
                None => (line.to_string(), String::new()),
            })
            .collect()
    }

    /// JSON objects and arrays pretty-printed with sorted keys; anything else as-is.
    pub fn pretty_body(&self) -> String {
        pretty_json(&self.body).unwrap_or_else(|| self.body.clone())
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == ExecutionOutcome::Cancelled
    }
}

pub(crate) fn pretty_json(text: &str) -> Option<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => serde_json::to_string_pretty(&value).ok(),
        _ => None,
    }
}

fn reason_phrase(code: u16) -> Option<&'static str> {
    let reason = match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => return None,
    };
    Some(reason)
}
