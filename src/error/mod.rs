//! Error handling module

use thiserror::Error;

/// Failure of a single HTTP exchange with the router
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client build failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to read response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    /// Classify a reqwest error raised while sending the request
    pub fn from_send(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e)
        } else if e.is_connect() {
            TransportError::Connect(e)
        } else {
            TransportError::Request(e)
        }
    }

    /// Classify a reqwest error raised while reading the body
    pub fn from_body(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e)
        } else {
            TransportError::Body(e)
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("No URL configured for {0}")]
    MissingUrl(&'static str),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = TransportError::Status(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP error: 404 Not Found");
    }

    #[test]
    fn test_missing_url_message() {
        let err = AppError::MissingUrl("router.password_url");
        assert_eq!(err.to_string(), "No URL configured for router.password_url");
    }
}
