//! Result delivery to the host application

use tokio::sync::mpsc;

/// Message kind tags understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MessageKind {
    PasswordRetrieved = 2,
    PasswordNotFound = 3,
    TransportFailed = 4,
}

impl MessageKind {
    pub fn tag(&self) -> u32 {
        *self as u32
    }
}

/// Outcome pushed to a [`ResultConsumer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieverMessage {
    /// Six-digit code found in the router response
    PasswordRetrieved(String),
    /// Response had no code; carries the URL. Only sent with `report_failures`.
    PasswordNotFound(String),
    /// Request failed; carries the error text. Only sent with `report_failures`.
    TransportFailed(String),
}

impl RetrieverMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            RetrieverMessage::PasswordRetrieved(_) => MessageKind::PasswordRetrieved,
            RetrieverMessage::PasswordNotFound(_) => MessageKind::PasswordNotFound,
            RetrieverMessage::TransportFailed(_) => MessageKind::TransportFailed,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            RetrieverMessage::PasswordRetrieved(s)
            | RetrieverMessage::PasswordNotFound(s)
            | RetrieverMessage::TransportFailed(s) => s,
        }
    }
}

/// Receiver of asynchronously delivered results
pub trait ResultConsumer: Send + Sync {
    fn deliver(&self, message: RetrieverMessage);
}

impl<F> ResultConsumer for F
where
    F: Fn(RetrieverMessage) + Send + Sync,
{
    fn deliver(&self, message: RetrieverMessage) {
        self(message)
    }
}

/// Forwards every message into an unbounded channel
#[derive(Clone)]
pub struct ChannelConsumer {
    tx: mpsc::UnboundedSender<RetrieverMessage>,
}

impl ChannelConsumer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RetrieverMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ResultConsumer for ChannelConsumer {
    fn deliver(&self, message: RetrieverMessage) {
        if self.tx.send(message).is_err() {
            tracing::debug!("Result receiver dropped, discarding message");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(MessageKind::PasswordRetrieved.tag(), 2);
        assert_eq!(MessageKind::PasswordNotFound.tag(), 3);
        assert_eq!(MessageKind::TransportFailed.tag(), 4);
    }

    #[test]
    fn test_message_kind_and_payload() {
        let msg = RetrieverMessage::PasswordRetrieved("482913".to_string());
        assert_eq!(msg.kind().tag(), 2);
        assert_eq!(msg.payload(), "482913");

        let msg = RetrieverMessage::TransportFailed("Connection failed".to_string());
        assert_eq!(msg.kind(), MessageKind::TransportFailed);
        assert_eq!(msg.payload(), "Connection failed");
    }

    #[test]
    fn test_closure_consumer() {
        let seen = Mutex::new(Vec::new());
        let consumer = |msg: RetrieverMessage| seen.lock().unwrap().push(msg.kind().tag());
        consumer.deliver(RetrieverMessage::PasswordRetrieved("111111".to_string()));
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_channel_consumer() {
        let (consumer, mut rx) = ChannelConsumer::new();
        consumer.deliver(RetrieverMessage::PasswordRetrieved("654321".to_string()));
        assert_eq!(
            rx.recv().await,
            Some(RetrieverMessage::PasswordRetrieved("654321".to_string()))
        );

        drop(rx);
        // Must not panic once the receiver is gone
        consumer.deliver(RetrieverMessage::PasswordRetrieved("000000".to_string()));
    }
}
