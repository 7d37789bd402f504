use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Backend answered with a non-success status. `message` holds the
    /// narrowed `errors` field of the body when it had a usable shape.
    #[error("Backend rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Human-readable message from the backend, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Unexpected(format!("Invalid response body: {err}"))
        } else {
            RepositoryError::ConnectionError(err.to_string())
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => join(items.iter()),
        Value::Object(map) => join(map.values()),
        Value::Bool(_) | Value::Null => None,
    }
}

fn join<'a>(values: impl Iterator<Item = &'a Value>) -> Option<String> {
    let parts: Vec<String> = values.filter_map(text_of).collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

/// Extracts the `errors` field of a backend error body.
///
/// Accepts a string, a list or an object of messages. Anything else,
/// including bodies that are not JSON, yields `None`.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("errors").and_then(text_of)
}
