//! Backend call errors.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

use super::types::ErrorBody;

/// Errors produced by backend operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (connect, timeout, I/O).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, detail: Option<String>, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build a status error, pulling the backend's `detail` (or `error`)
    /// field out of the body when it is JSON.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        let detail = extract_detail(&body);
        Self::Status { status, detail, body }
    }

    /// Text shown to the user: backend detail when present, otherwise the
    /// error's own message.
    #[must_use]
    pub fn alert_detail(&self) -> String {
        match self {
            Self::Status { detail: Some(detail), .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    match parsed.detail {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        Some(Value::String(_) | Value::Null) | None => parsed.error.filter(|text| !text.is_empty()),
        Some(other) => Some(other.to_string()),
    }
}
