//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

static INIT: Once = Once::new();

pub const REELS_ACCEPTED_TOTAL: &str = "reels_accepted_total";
pub const REEL_PUBLISH_FAILURES_TOTAL: &str = "reel_publish_failures_total";

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    });
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_reel_accepted() {
    counter!(REELS_ACCEPTED_TOTAL).increment(1);
}

pub fn record_publish_failure(kind: &'static str) {
    counter!(REEL_PUBLISH_FAILURES_TOTAL, "kind" => kind).increment(1);
}
