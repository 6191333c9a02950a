//! Error types for the backend client.

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured API base URL can't be used to build endpoint URLs.
    #[error("invalid API base url: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's `{ "error": ... }` text when it sent one,
    /// otherwise the raw body.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body didn't match the expected shape.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// The HTTP status, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `true` when the backend rejected the bearer token (HTTP 401).
    ///
    /// This is the one failure the session resolver treats as "not signed
    /// in" rather than as an outage.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
