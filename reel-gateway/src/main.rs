use reel_gateway::config::GatewayConfig;
use reel_gateway::services::init_metrics;
use reel_gateway::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Tracing depends on LOG_LEVEL, so configuration errors go to stderr.
    let config = GatewayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "reel-gateway",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    tracing::info!(
        environment = %config.environment,
        queue_url = %config.queue.url,
        s3_bucket = config.s3_bucket.as_deref().unwrap_or("-"),
        ecs_cluster = config.ecs_cluster.as_deref().unwrap_or("-"),
        cluster_name = config.cluster_name.as_deref().unwrap_or("-"),
        "Starting reel gateway"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
