use service_core::config as core_config;
use service_core::config::environment::{env_var_candidates, ENVIRONMENT_VAR};
use service_core::config::{process_env, resolve_first, Environment};
use service_core::error::AppError;
use std::time::Duration;

/// Queue used when no `SQS_QUEUE_URL` is configured outside production.
pub const DEFAULT_QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/reel-commands";

const DEFAULT_SEND_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub queue: QueueConfig,
    pub s3_bucket: Option<String>,
    pub ecs_cluster: Option<String>,
    pub cluster_name: Option<String>,
    /// Read secrets from `LOCAL_*` variables instead of Secrets Manager.
    pub use_local_secrets: bool,
    /// When set, spans are exported over OTLP.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub backend: QueueBackend,
    pub url: String,
    pub send_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBackend {
    Sqs,
    Memory,
}

impl std::str::FromStr for QueueBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqs" => Ok(QueueBackend::Sqs),
            "memory" => Ok(QueueBackend::Memory),
            _ => Err(format!("Invalid queue backend: {}", s)),
        }
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, process_env)
    }

    /// Builds the configuration from `lookup`, which must treat empty values
    /// as unset.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_label(lookup(ENVIRONMENT_VAR).as_deref());
        let env_specific = |base: &str| {
            resolve_first(&env_var_candidates(base, environment), &lookup).map(|r| r.value)
        };

        let backend = match lookup("QUEUE_BACKEND") {
            Some(value) => value
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            None => QueueBackend::Sqs,
        };

        let url = match env_specific("SQS_QUEUE_URL") {
            Some(url) => url,
            None if environment.is_prod() && backend == QueueBackend::Sqs => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "SQS_QUEUE_URL is required in production but not set"
                )));
            }
            None => DEFAULT_QUEUE_URL.to_string(),
        };

        let send_timeout_secs = match lookup("QUEUE_SEND_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(0) => {
                    return Err(AppError::ConfigError(anyhow::anyhow!(
                        "QUEUE_SEND_TIMEOUT_SECS must be at least 1"
                    )));
                }
                Ok(secs) => secs,
                Err(e) => {
                    return Err(AppError::ConfigError(anyhow::anyhow!(
                        "Invalid QUEUE_SEND_TIMEOUT_SECS '{}': {}",
                        value,
                        e
                    )));
                }
            },
            None => DEFAULT_SEND_TIMEOUT_SECS,
        };

        Ok(GatewayConfig {
            common,
            environment,
            queue: QueueConfig {
                backend,
                url,
                send_timeout: Duration::from_secs(send_timeout_secs),
            },
            s3_bucket: env_specific("S3_BUCKET"),
            ecs_cluster: env_specific("ECS_CLUSTER"),
            cluster_name: env_specific("CLUSTER_NAME"),
            use_local_secrets: lookup("USE_LOCAL_SECRETS").as_deref() == Some("true"),
            otlp_endpoint: lookup("OTLP_ENDPOINT"),
        })
    }
}
