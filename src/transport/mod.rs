//! HTTP transport to the router web interface
//!
//! - `client`: reqwest-backed implementation of [`HttpTransport`]

pub mod client;

pub use client::ReqwestTransport;

use async_trait::async_trait;

use crate::error::TransportError;

// ============================================================================
// Types
// ============================================================================

/// HTTP method of a request, with the POST payload attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post { body: String },
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post { .. } => "POST",
        }
    }
}

/// One request to the router, built per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: RequestMethod,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RequestMethod::Get,
        }
    }

    /// POST with a form-urlencoded body
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RequestMethod::Post { body: body.into() },
        }
    }
}

/// Issues a single request and returns the full response body as text
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<String, TransportError>;
}

/// Concatenate response lines, dropping their terminators
pub fn join_lines(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_constructors() {
        let get = RequestDescriptor::get("http://192.168.1.1/pw");
        assert_eq!(get.method, RequestMethod::Get);
        assert_eq!(get.method.as_str(), "GET");

        let post = RequestDescriptor::post("http://192.168.1.1/set", "password=1");
        assert_eq!(post.url, "http://192.168.1.1/set");
        assert_eq!(
            post.method,
            RequestMethod::Post {
                body: "password=1".to_string()
            }
        );
        assert_eq!(post.method.as_str(), "POST");
    }

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines("abc\n123\r\n456\n"), "abc123456");
        assert_eq!(join_lines("12\r3456"), "123456");
        assert_eq!(join_lines("single"), "single");
        assert_eq!(join_lines(""), "");
    }
}
