use thiserror::Error;

/// Failure of a request issued through [`crate::VerdantClient`].
///
/// The client never retries; callers decide what a failure means for them.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("could not connect to the backend: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl NetworkError {
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            NetworkError::Timeout(error)
        } else if error.is_connect() {
            NetworkError::Connect(error)
        } else {
            NetworkError::Transport(error)
        }
    }

    /// HTTP status code for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message suitable for a status banner.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::Status { status, .. } => {
                status_error_message(*status).map(str::to_owned).unwrap_or_else(|| format!("HTTP {status}"))
            }
            other => other.to_string(),
        }
    }
}

/// Return a user-friendly error message for common HTTP status codes.
pub fn status_error_message(status_code: u16) -> Option<&'static str> {
    match status_code {
        401 => Some("Unauthorized (401). Hint: set VERDANT_API_TOKEN=... or pass --token"),
        403 => Some("Forbidden (403). Hint: the token is valid but lacks access to products"),
        404 => Some("Not found (404). Hint: check VERDANT_API_BASE points at the products backend"),
        _ => None,
    }
}
