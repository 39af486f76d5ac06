//! In-memory queue client for local development and tests.

use super::{QueueClient, QueueError, QueueMessage};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;

/// A message accepted by [`InMemoryQueueClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub queue_url: String,
    pub message: QueueMessage,
}

/// Records every message it is given instead of sending it anywhere.
#[derive(Debug, Default)]
pub struct InMemoryQueueClient {
    sent: Mutex<Vec<SentMessage>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl InMemoryQueueClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every send fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Delays each send, for exercising send timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl QueueClient for InMemoryQueueClient {
    async fn send_message(&self, queue_url: &str, message: QueueMessage) -> Result<(), QueueError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(reason) = &self.failure {
            return Err(QueueError::SendFailed(reason.clone()));
        }

        self.sent.lock().await.push(SentMessage {
            queue_url: queue_url.to_string(),
            message,
        });
        Ok(())
    }
}
