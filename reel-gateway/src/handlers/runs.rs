use crate::models::RunStatus;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

/// `GET /runs/{runId}`.
pub async fn get_run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Json<RunStatus>, AppError> {
    // Blank ids are rejected, but the id is otherwise echoed as given.
    if run_id.trim().is_empty() {
        return Err(missing_run_id().await);
    }

    tracing::info!(run_id = %run_id, "Fetching run status");

    let status = state.run_status.get_status(&run_id).await?;
    Ok(Json(status))
}

/// `GET /runs/` with no identifier.
pub async fn missing_run_id() -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Missing runId"))
}
