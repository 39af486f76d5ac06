pub mod health;
pub mod metrics;
pub mod reels;
pub mod runs;

pub use self::metrics::metrics_endpoint;
pub use health::health_check;
pub use reels::create_reel;
pub use runs::{get_run_status, missing_run_id};

use service_core::error::AppError;

/// Method fallback for routes that only accept a single method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}
