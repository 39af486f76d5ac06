//! Reel command publishing.
//!
//! Each accepted intake request becomes exactly one queue message whose body
//! is the JSON-encoded request and whose `runId` attribute carries the run
//! identifier. There is no retry and no de-duplication: a client that retries
//! its POST gets a second run id and a second message, and the downstream
//! consumer is expected to tolerate that.

use crate::models::RunId;
use crate::services::queue::{QueueClient, QueueError, QueueMessage};
use serde::Serialize;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Message attribute carrying the run identifier.
pub const RUN_ID_ATTRIBUTE: &str = "runId";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to serialize reel command: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to send reel command: {0}")]
    Transport(#[from] QueueError),
}

impl PublishError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PublishError::Serialization(_) => "serialization",
            PublishError::Transport(QueueError::Timeout(_)) => "timeout",
            PublishError::Transport(_) => "transport",
        }
    }
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::Serialization(e) => AppError::InternalError(anyhow::Error::new(e)),
            PublishError::Transport(_) => {
                AppError::BadGateway("Failed to enqueue reel command".to_string())
            }
        }
    }
}

/// Publishes reel commands to the configured queue.
#[derive(Clone)]
pub struct CommandPublisher {
    queue_url: String,
    client: Arc<dyn QueueClient>,
    send_timeout: Duration,
}

impl CommandPublisher {
    pub fn new(
        queue_url: impl Into<String>,
        client: Arc<dyn QueueClient>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            queue_url: queue_url.into(),
            client,
            send_timeout,
        }
    }

    /// Serializes `payload` and sends it as a single message tagged with `run_id`.
    ///
    /// The send is bounded by the configured timeout.
    pub async fn publish<T>(&self, run_id: &RunId, payload: &T) -> Result<(), PublishError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload)?;
        let message = QueueMessage::new(body).with_attribute(RUN_ID_ATTRIBUTE, run_id.to_string());

        let result = tokio::time::timeout(
            self.send_timeout,
            self.client.send_message(&self.queue_url, message),
        )
        .await
        .unwrap_or(Err(QueueError::Timeout(self.send_timeout)));

        match result {
            Ok(()) => {
                tracing::info!(
                    run_id = %run_id,
                    queue = %self.queue_url,
                    "Published reel command"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    run_id = %run_id,
                    queue = %self.queue_url,
                    error = %e,
                    "Failed to publish reel command"
                );
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::queue::InMemoryQueueClient;
    use serde::ser::Error as _;
    use serde_json::json;

    const QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/test-queue";

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cannot encode"))
        }
    }

    fn publisher(client: Arc<InMemoryQueueClient>) -> CommandPublisher {
        CommandPublisher::new(QUEUE_URL, client, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn publishes_body_and_run_id_attribute() {
        let client = Arc::new(InMemoryQueueClient::new());
        let run_id = RunId::new();
        let payload = json!({ "projectId": "proj_123", "idea": "Test reel idea" });

        publisher(client.clone())
            .publish(&run_id, &payload)
            .await
            .unwrap();

        let sent = client.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].queue_url, QUEUE_URL);
        assert_eq!(
            sent[0].message.attribute(RUN_ID_ATTRIBUTE),
            Some(run_id.to_string().as_str())
        );

        let body: serde_json::Value = serde_json::from_str(&sent[0].message.body).unwrap();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn serialization_failure_sends_nothing() {
        let client = Arc::new(InMemoryQueueClient::new());

        let err = publisher(client.clone())
            .publish(&RunId::new(), &Unserializable)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Serialization(_)));
        assert_eq!(err.kind(), "serialization");
        assert!(client.sent().await.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let client = Arc::new(InMemoryQueueClient::failing("connection reset"));

        let err = publisher(client)
            .publish(&RunId::new(), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Transport(QueueError::SendFailed(_))));
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn slow_send_times_out() {
        let client =
            Arc::new(InMemoryQueueClient::new().with_delay(Duration::from_millis(200)));
        let publisher = CommandPublisher::new(QUEUE_URL, client, Duration::from_millis(20));

        let err = publisher
            .publish(&RunId::new(), &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::Transport(QueueError::Timeout(_))));
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn transport_errors_map_to_bad_gateway() {
        let app_err: AppError =
            PublishError::Transport(QueueError::SendFailed("down".into())).into();
        assert!(matches!(app_err, AppError::BadGateway(_)));
    }
}
