//! Deployment environment resolution.
//!
//! Configuration and secrets are looked up under an environment-specific key
//! first (`SQS_QUEUE_URL_STAGING`, `api-key-staging`) and then under the bare
//! base key. The functions here only build candidate lists; callers supply the
//! lookup, so every fallback chain can be exercised without touching the
//! process environment or the network.

use std::fmt;

/// Environment variable holding the deployment label.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Parses a deployment label. Matching is case-insensitive; a missing or
    /// unrecognised label resolves to `Dev`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("staging") => Environment::Staging,
            Some("prod") => Environment::Prod,
            _ => Environment::Dev,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    pub fn is_prod(&self) -> bool {
        *self == Environment::Prod
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Environment-suffixed name for a secret, e.g. `api-key` -> `api-key-staging`.
pub fn resolve_key(base: &str, env: Environment) -> String {
    format!("{}-{}", base, env.as_str())
}

/// Secret names to try, most specific first.
pub fn secret_candidates(base: &str, env: Environment) -> Vec<String> {
    vec![resolve_key(base, env), base.to_string()]
}

/// Environment variable names to try, most specific first,
/// e.g. `S3_BUCKET` -> `[S3_BUCKET_PROD, S3_BUCKET]`.
pub fn env_var_candidates(base: &str, env: Environment) -> Vec<String> {
    vec![
        format!("{}_{}", base, env.as_str().to_ascii_uppercase()),
        base.to_string(),
    ]
}

/// A value found under one of the candidate keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub key: String,
    pub value: String,
}

/// Returns the first candidate whose lookup yields a non-empty value.
pub fn resolve_first<F>(candidates: &[String], lookup: F) -> Option<Resolved>
where
    F: Fn(&str) -> Option<String>,
{
    candidates.iter().find_map(|key| {
        lookup(key)
            .filter(|value| !value.is_empty())
            .map(|value| Resolved {
                key: key.clone(),
                value,
            })
    })
}

/// Process environment lookup treating empty values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
