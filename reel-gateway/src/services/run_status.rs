use crate::models::RunStatus;
use async_trait::async_trait;
use service_core::error::AppError;

/// Source of run progress for `GET /runs/{runId}`.
#[async_trait]
pub trait RunStatusStore: Send + Sync {
    async fn get_status(&self, run_id: &str) -> Result<RunStatus, AppError>;
}

/// Placeholder store until run state is persisted: every run reports
/// `PENDING` with no steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingRunStatusStore;

#[async_trait]
impl RunStatusStore for PendingRunStatusStore {
    async fn get_status(&self, run_id: &str) -> Result<RunStatus, AppError> {
        Ok(RunStatus::pending(run_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunState;

    #[tokio::test]
    async fn always_pending() {
        let status = PendingRunStatusStore.get_status("run-42").await.unwrap();
        assert_eq!(status.run_id, "run-42");
        assert_eq!(status.status, RunState::Pending);
        assert!(status.steps.is_empty());
    }
}
