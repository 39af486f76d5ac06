//! Message queue abstraction.
//!
//! The publisher only needs "send one message with string attributes", so the
//! trait stays that narrow. SQS is the production backend; the in-memory
//! client backs local runs and tests.

pub mod memory;
pub mod sqs;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

pub use memory::{InMemoryQueueClient, SentMessage};
pub use sqs::SqsQueueClient;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Send timed out after {0:?}")]
    Timeout(Duration),
}

/// A transport-neutral message: a string body plus string-typed attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub body: String,
    pub attributes: BTreeMap<String, String>,
}

impl QueueMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Sends messages to a queue. Implementations must be safe to share across
/// concurrent requests.
#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn send_message(&self, queue_url: &str, message: QueueMessage) -> Result<(), QueueError>;
}
