//! Router password retriever
//!
//! - `extract`: six-digit code pattern and set-body encoders
//! - `consumer`: result delivery to the host
//!
//! Both public operations spawn onto the current tokio runtime and return at once.
//! A retrieval reports back at most once; misses and transport failures stay
//! silent unless `report_failures` is set.

pub mod consumer;
pub mod extract;

pub use consumer::{ChannelConsumer, MessageKind, ResultConsumer, RetrieverMessage};
pub use extract::{encode_set_body, extract_code};

use std::sync::Arc;

use regex::Regex;
use tokio::task::JoinHandle;

use crate::config::{FormEncoding, RetrieverConfig};
use crate::error::TransportError;
use crate::transport::{HttpTransport, RequestDescriptor};

#[derive(Debug, Clone, Copy, Default)]
pub struct RetrieverOptions {
    pub form_encoding: FormEncoding,
    /// Deliver `PasswordNotFound` / `TransportFailed` instead of staying silent
    pub report_failures: bool,
}

impl From<&RetrieverConfig> for RetrieverOptions {
    fn from(config: &RetrieverConfig) -> Self {
        Self {
            form_encoding: config.form_encoding,
            report_failures: config.report_failures,
        }
    }
}

/// Fetches and updates the router password in the background
#[derive(Clone)]
pub struct Retriever {
    transport: Arc<dyn HttpTransport>,
    consumer: Arc<dyn ResultConsumer>,
    pattern: Regex,
    options: RetrieverOptions,
}

impl Retriever {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        consumer: Arc<dyn ResultConsumer>,
        options: RetrieverOptions,
    ) -> Self {
        Self {
            transport,
            consumer,
            pattern: extract::code_pattern(),
            options,
        }
    }

    /// GET `url` and return the first six-digit code in the body
    pub async fn fetch_router_password(
        &self,
        url: &str,
    ) -> Result<Option<String>, TransportError> {
        let body = self.transport.fetch(&RequestDescriptor::get(url)).await?;
        Ok(extract_code(&self.pattern, &body).map(String::from))
    }

    /// Spawn a retrieval; a found code is delivered as `PasswordRetrieved`
    pub fn get_router_password(&self, url: impl Into<String>) -> JoinHandle<()> {
        let url = url.into();
        let this = self.clone();

        tokio::spawn(async move {
            match this.fetch_router_password(&url).await {
                Ok(Some(code)) => {
                    tracing::info!("Router password retrieved from {}", url);
                    tracing::debug!("Router password code: {}", code);
                    this.consumer.deliver(RetrieverMessage::PasswordRetrieved(code));
                }
                Ok(None) => {
                    tracing::info!("No password code found in response from {}", url);
                    if this.options.report_failures {
                        this.consumer.deliver(RetrieverMessage::PasswordNotFound(url));
                    }
                }
                Err(e) => {
                    tracing::warn!("Router password request to {} failed: {}", url, e);
                    if this.options.report_failures {
                        this.consumer
                            .deliver(RetrieverMessage::TransportFailed(e.to_string()));
                    }
                }
            }
        })
    }

    /// Spawn a password update; the response and any error are discarded
    pub fn set_router_password(
        &self,
        url: impl Into<String>,
        password: &str,
        secret: &str,
    ) -> JoinHandle<()> {
        let body = encode_set_body(password, secret, self.options.form_encoding);
        let request = RequestDescriptor::post(url, body);
        let transport = self.transport.clone();

        tokio::spawn(async move {
            match transport.fetch(&request).await {
                Ok(_) => tracing::info!("Router password update sent to {}", request.url),
                Err(e) => {
                    tracing::warn!("Router password update to {} failed: {}", request.url, e)
                }
            }
        })
    }
}
