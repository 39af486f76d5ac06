use super::{QueueClient, QueueError, QueueMessage};
use async_trait::async_trait;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::MessageAttributeValue;
use aws_sdk_sqs::Client;
use std::collections::HashMap;

/// SQS data type used for every message attribute.
const STRING_DATA_TYPE: &str = "String";

/// [`QueueClient`] backed by Amazon SQS.
#[derive(Clone)]
pub struct SqsQueueClient {
    client: Client,
}

impl SqsQueueClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn send_message(&self, queue_url: &str, message: QueueMessage) -> Result<(), QueueError> {
        let mut attributes = HashMap::with_capacity(message.attributes.len());
        for (name, value) in message.attributes {
            let attribute = MessageAttributeValue::builder()
                .data_type(STRING_DATA_TYPE)
                .string_value(value)
                .build()
                .map_err(|e| QueueError::InvalidMessage(e.to_string()))?;
            attributes.insert(name, attribute);
        }

        let output = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(message.body)
            .set_message_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| QueueError::SendFailed(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            message_id = output.message_id().unwrap_or("-"),
            "SQS message sent"
        );

        Ok(())
    }
}
