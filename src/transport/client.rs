//! reqwest-backed router transport
//!
//! One request per call, no retries. The connect timeout defaults to 10s and
//! the body is read in full before it is handed back.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{join_lines, HttpTransport, RequestDescriptor, RequestMethod};
use crate::config::TransportConfig;
use crate::error::TransportError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.read_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(TransportError::Client)?;
        Ok(Self { client })
    }

    fn parse_url(raw: &str) -> Result<url::Url, TransportError> {
        let url = url::Url::parse(raw)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(TransportError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                raw, scheme
            ))),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<String, TransportError> {
        let url = Self::parse_url(&request.url)?;

        let builder = match &request.method {
            RequestMethod::Get => self.client.get(url),
            RequestMethod::Post { body } => self
                .client
                .post(url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone().into_bytes()),
        };

        tracing::debug!("{} {}", request.method.as_str(), request.url);

        // The response owns the connection; it is released when dropped on any path below.
        let response = builder.send().await.map_err(TransportError::from_send)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(TransportError::Status(status));
        }

        let bytes = response.bytes().await.map_err(TransportError::from_body)?;
        // Malformed bytes (e.g. GBK pages) become U+FFFD; ASCII digits survive.
        let text = String::from_utf8_lossy(&bytes);

        Ok(join_lines(&text))
    }
}
