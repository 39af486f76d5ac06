//! Application wiring and server lifecycle.

use crate::config::{GatewayConfig, QueueBackend};
use crate::handlers;
use crate::services::{
    load_local_secrets, load_secrets, AwsSecretStore, CommandPublisher, InMemoryQueueClient,
    PendingRunStatusStore, QueueClient, RunStatusStore, SecretBundle, SqsQueueClient,
};
use aws_config::{BehaviorVersion, SdkConfig};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::config::process_env;
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::OnceCell;
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub secrets: Arc<SecretBundle>,
    pub publisher: CommandPublisher,
    pub run_status: Arc<dyn RunStatusStore>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        secrets: SecretBundle,
        queue_client: Arc<dyn QueueClient>,
        run_status: Arc<dyn RunStatusStore>,
    ) -> Self {
        let publisher = CommandPublisher::new(
            config.queue.url.clone(),
            queue_client,
            config.queue.send_timeout,
        );

        Self {
            config: Arc::new(config),
            secrets: Arc::new(secrets),
            publisher,
            run_status,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/reels",
            post(handlers::create_reel).fallback(handlers::method_not_allowed),
        )
        .route(
            "/runs",
            get(handlers::missing_run_id).fallback(handlers::method_not_allowed),
        )
        .route(
            "/runs/",
            get(handlers::missing_run_id).fallback(handlers::method_not_allowed),
        )
        .route(
            "/runs/:run_id",
            get(handlers::get_run_status).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application from configuration: load secrets, choose the
    /// queue client, and bind the listener.
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        // Only touch the AWS credential chain if something actually needs it.
        let aws = OnceCell::new();

        let secrets = if config.use_local_secrets {
            if config.environment.is_prod() {
                tracing::warn!("USE_LOCAL_SECRETS is enabled in production");
            }
            load_local_secrets(process_env)
        } else {
            let sdk_config = aws.get_or_init(load_aws_config).await;
            let store = AwsSecretStore::from_sdk_config(sdk_config).map_err(|e| {
                tracing::error!("Failed to initialize secret store: {}", e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?;
            load_secrets(&store, config.environment).await
        };

        tracing::info!(
            loaded = secrets.loaded_count(),
            missing = ?secrets.missing(),
            "Secrets loaded"
        );

        let queue_client: Arc<dyn QueueClient> = match config.queue.backend {
            QueueBackend::Sqs => {
                let sdk_config = aws.get_or_init(load_aws_config).await;
                tracing::info!(queue_url = %config.queue.url, "Using SQS queue client");
                Arc::new(SqsQueueClient::new(aws_sdk_sqs::Client::new(sdk_config)))
            }
            QueueBackend::Memory => {
                tracing::warn!("Using in-memory queue client; reel commands will not leave this process");
                Arc::new(InMemoryQueueClient::new())
            }
        };

        Self::build_with(config, secrets, queue_client, Arc::new(PendingRunStatusStore)).await
    }

    /// Build the application from explicit collaborators.
    pub async fn build_with(
        config: GatewayConfig,
        secrets: SecretBundle,
        queue_client: Arc<dyn QueueClient>,
        run_status: Arc<dyn RunStatusStore>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = %config.environment,
            "Reel gateway listening"
        );

        let state = AppState::new(config, secrets, queue_client, run_status);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn load_aws_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest()).load().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
