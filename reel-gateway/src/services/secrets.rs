//! Startup secret loading.
//!
//! Each credential is looked up under its environment-specific name first
//! (`api-key-staging`) and then under its base name (`api-key`). A credential
//! that cannot be found under either name is left empty and recorded as
//! missing; one absent secret never fails the whole load.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use secrecy::Secret;
use service_core::config::environment::secret_candidates;
use service_core::config::Environment;
use thiserror::Error;

/// Base names of every credential the gateway loads.
pub const SECRET_NAMES: [&str; 5] = [
    "api-key",
    "database-url",
    "jwt-secret",
    "oauth-client-id",
    "oauth-client-secret",
];

#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret store not configured: {0}")]
    NotConfigured(String),

    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Secret store request failed: {0}")]
    Request(String),
}

/// Remote store of named secrets.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches the string value of `name`. `Ok(None)` means the secret exists
    /// but holds no string value.
    async fn get_secret_value(&self, name: &str) -> Result<Option<String>, SecretStoreError>;
}

/// [`SecretStore`] backed by AWS Secrets Manager.
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    /// Fails when the SDK configuration has no region, since no request could
    /// ever reach the store.
    pub fn from_sdk_config(config: &SdkConfig) -> Result<Self, SecretStoreError> {
        if config.region().is_none() {
            return Err(SecretStoreError::NotConfigured(
                "no AWS region could be resolved".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(config),
        })
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_value(&self, name: &str) -> Result<Option<String>, SecretStoreError> {
        match self.client.get_secret_value().secret_id(name).send().await {
            Ok(output) => Ok(output.secret_string().map(str::to_string)),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_resource_not_found_exception() {
                    Err(SecretStoreError::NotFound(name.to_string()))
                } else {
                    Err(SecretStoreError::Request(
                        DisplayErrorContext(&err).to_string(),
                    ))
                }
            }
        }
    }
}

/// Credentials loaded at startup. Values are redacted in `Debug` output.
#[derive(Debug, Default)]
pub struct SecretBundle {
    pub api_key: Option<Secret<String>>,
    pub database_url: Option<Secret<String>>,
    pub jwt_secret: Option<Secret<String>>,
    pub oauth_client_id: Option<Secret<String>>,
    pub oauth_client_secret: Option<Secret<String>>,
    missing: Vec<&'static str>,
}

impl SecretBundle {
    fn slot(&mut self, name: &str) -> Option<&mut Option<Secret<String>>> {
        match name {
            "api-key" => Some(&mut self.api_key),
            "database-url" => Some(&mut self.database_url),
            "jwt-secret" => Some(&mut self.jwt_secret),
            "oauth-client-id" => Some(&mut self.oauth_client_id),
            "oauth-client-secret" => Some(&mut self.oauth_client_secret),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: String) {
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.slot(name) {
            *slot = Some(Secret::new(value));
        }
    }

    /// Base names of secrets that could not be found.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn loaded_count(&self) -> usize {
        [
            &self.api_key,
            &self.database_url,
            &self.jwt_secret,
            &self.oauth_client_id,
            &self.oauth_client_secret,
        ]
        .iter()
        .filter(|s| s.is_some())
        .count()
    }
}

/// Loads every secret in [`SECRET_NAMES`] from `store`.
pub async fn load_secrets(store: &dyn SecretStore, environment: Environment) -> SecretBundle {
    let mut bundle = SecretBundle::default();

    for base in SECRET_NAMES {
        let candidates = secret_candidates(base, environment);
        let mut found = None;

        for (idx, name) in candidates.iter().enumerate() {
            match store.get_secret_value(name).await {
                Ok(value) => {
                    found = Some((name, value));
                    break;
                }
                Err(e) => {
                    if let Some(fallback) = candidates.get(idx + 1) {
                        tracing::info!(
                            secret = %name,
                            fallback = %fallback,
                            error = %e,
                            "Secret not found, trying fallback"
                        );
                    }
                }
            }
        }

        match found {
            Some((name, value)) => {
                if let Some(raw) = value {
                    bundle.set(base, extract_secret_value(base, &raw));
                }
                tracing::info!(
                    secret = %name,
                    environment = %environment,
                    "Loaded secret"
                );
            }
            None => {
                tracing::warn!(
                    secret = base,
                    environment = %environment,
                    "Secret not found under any candidate name, leaving empty"
                );
                bundle.missing.push(base);
            }
        }
    }

    bundle
}

/// Loads secrets from `LOCAL_*` variables instead of the remote store.
/// Only meant for running the gateway on a developer machine.
pub fn load_local_secrets<F>(lookup: F) -> SecretBundle
where
    F: Fn(&str) -> Option<String>,
{
    tracing::warn!("WARNING: Loading secrets from environment variables (LOCAL DEVELOPMENT ONLY)");

    let mut bundle = SecretBundle::default();
    for base in SECRET_NAMES {
        match lookup(&local_var_name(base)).filter(|v| !v.is_empty()) {
            Some(value) => bundle.set(base, value),
            None => bundle.missing.push(base),
        }
    }
    bundle
}

/// `database-url` -> `LOCAL_DATABASE_URL`.
pub fn local_var_name(base: &str) -> String {
    format!("LOCAL_{}", base.to_ascii_uppercase().replace('-', "_"))
}

/// Secrets may be stored either as a bare string or as a JSON object keyed by
/// the secret's base name. Anything else is used verbatim.
fn extract_secret_value(base: &str, raw: &str) -> String {
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
        Ok(object) => match object.get(base) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}
