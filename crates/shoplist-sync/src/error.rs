//! Error taxonomy and the server's JSON envelope contract.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Non-2xx status or `success: false`
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    /// Body was not the JSON we expected
    #[error("undecodable response (status {status}): {detail}")]
    Decode { status: u16, detail: String },

    /// A required page anchor (CSRF token, list id) is absent
    #[error("missing precondition: {0}")]
    MissingPrecondition(String),

    /// Server-rendered page data that could not be read
    #[error("unreadable page data: {0}")]
    PageData(String),

    /// A local guard refused the operation
    #[error("{0}")]
    Rejected(String),
}

impl SyncError {
    /// Text shown to the user. `fallback` is used when a failed request
    /// carried no message of its own.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SyncError::Validation(msg) | SyncError::Rejected(msg) => msg.clone(),
            SyncError::Request { message: Some(msg), .. } if !msg.is_empty() => msg.clone(),
            SyncError::Request { status, .. } => format!("{fallback} (Status: {status})"),
            SyncError::Decode { status, .. } => format!("Request failed (Status: {status})"),
            SyncError::Network(_) => "Network error or issue processing request.".to_string(),
            SyncError::MissingPrecondition(what) => format!("Error: {what}. Please refresh."),
            SyncError::PageData(what) => format!("{what} Please refresh."),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Validation(_))
    }
}

/// Decode a response body according to the `{success, message, ...}` envelope.
///
/// Success requires a 2xx status AND `success == true`; anything else is a
/// `Request` failure carrying the server message when present. A body that is
/// not JSON at all is a `Decode` failure.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, SyncError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SyncError::Decode {
        status,
        detail: e.to_string(),
    })?;

    let ok_status = (200..=299).contains(&status);
    let success = value.get("success").and_then(Value::as_bool) == Some(true);
    if !ok_status || !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(SyncError::Request { status, message });
    }

    serde_json::from_value(value).map_err(|e| SyncError::Decode {
        status,
        detail: e.to_string(),
    })
}
