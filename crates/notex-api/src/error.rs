//! Error types for notex-api

use thiserror::Error;

/// Result type alias using notex-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the NoteX backend
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// Carries the backend's `detail` string, or the endpoint's fallback message.
    #[error("{0}")]
    Request(String),

    /// The configured base URL cannot be used
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Create a request error from a backend detail string
    pub fn request(detail: impl Into<String>) -> Self {
        Self::Request(detail.into())
    }

    /// Message suitable for showing to the user.
    ///
    /// Request errors render the backend detail verbatim; everything else uses
    /// the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Request(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_displays_detail_only() {
        let e = Error::request("model not found");
        assert_eq!(e.to_string(), "model not found");
        assert_eq!(e.user_message(), "model not found");
    }

    #[test]
    fn test_invalid_url_display() {
        let e = Error::InvalidUrl("ftp://nope".into());
        assert_eq!(e.to_string(), "Invalid base URL: ftp://nope");
    }

    #[test]
    fn test_json_error_user_message() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = Error::from(parse);
        assert!(e.user_message().starts_with("JSON error"));
    }
}
