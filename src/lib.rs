//! SingleNet Robot - router password client
//!
//! Retrieves the six-digit password a router publishes on its web interface
//! and pushes it to a registered consumer, or posts a new one.

pub mod config;
pub mod error;
pub mod retriever;
pub mod transport;

pub use error::{AppError, TransportError};
pub use retriever::{
    ChannelConsumer, MessageKind, ResultConsumer, Retriever, RetrieverMessage, RetrieverOptions,
};
pub use transport::{HttpTransport, ReqwestTransport, RequestDescriptor};
