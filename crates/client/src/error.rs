//! Publishing errors and server error-body normalization.

use serde_json::Value;

/// Errors from the publishing API layer.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// No API key configured; nothing was sent.
    #[error("API key is required")]
    MissingApiKey,

    /// The payload serialized to `null`; nothing was sent.
    #[error("Payload is required")]
    MissingPayload,

    /// The payload could not be encoded as JSON.
    #[error("Failed to encode payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request never produced a response (network, DNS, TLS, etc.).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Best available human-readable message.
        message: String,
        /// Parsed response body, if it was JSON.
        body: Option<Value>,
    },

    /// A 2xx response whose body was not the expected JSON.
    #[error("Unexpected response body: {0}")]
    InvalidResponse(String),
}

impl PublishError {
    /// HTTP status, present only when the server responded.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures caught before any request was made.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey | Self::MissingPayload | Self::Serialize(_)
        )
    }
}

/// Pick the message for a failed response.
///
/// Preference order: the body's `message` string, the body's `errors`
/// array joined with `", "`, then `HTTP <status>: <reason>`. Empty
/// candidates are skipped.
pub fn error_message(status: reqwest::StatusCode, body: Option<&Value>) -> String {
    if let Some(body) = body {
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            let joined = errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return joined;
            }
        }
    }
    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}
