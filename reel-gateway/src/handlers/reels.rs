use crate::models::{CreateReelRequest, CreateReelResponse, RunId};
use crate::services::metrics::{record_publish_failure, record_reel_accepted};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;

/// `POST /reels`: validate, assign a run id, enqueue, and acknowledge.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that every decode failure, including a missing content type, is a 400.
pub async fn create_reel(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request: CreateReelRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected reel request with malformed body");
        AppError::BadRequest(anyhow::anyhow!("Invalid request body"))
    })?;

    let run_id = RunId::new();

    state
        .publisher
        .publish(&run_id, &request)
        .await
        .map_err(|e| {
            record_publish_failure(e.kind());
            AppError::from(e)
        })?;

    record_reel_accepted();
    tracing::info!(
        run_id = %run_id,
        project_id = %request.project_id,
        "Accepted reel request"
    );

    Ok((StatusCode::ACCEPTED, Json(CreateReelResponse { run_id })))
}
