pub mod metrics;
pub mod publisher;
pub mod queue;
pub mod run_status;
pub mod secrets;

pub use self::metrics::{get_metrics, init_metrics};
pub use publisher::{CommandPublisher, PublishError, RUN_ID_ATTRIBUTE};
pub use queue::{InMemoryQueueClient, QueueClient, QueueError, QueueMessage, SqsQueueClient};
pub use run_status::{PendingRunStatusStore, RunStatusStore};
pub use secrets::{load_local_secrets, load_secrets, AwsSecretStore, SecretBundle, SecretStore};
