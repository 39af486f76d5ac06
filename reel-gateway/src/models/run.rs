use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier minted once per accepted reel request.
///
/// Rendered as the canonical hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Status document returned by `GET /runs/{runId}`.
///
/// `run_id` is kept as the caller-supplied string; lookups are not restricted
/// to identifiers this process minted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStatus {
    pub run_id: String,
    pub status: RunState,
    pub steps: Vec<RunStep>,
}

impl RunStatus {
    pub fn pending(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            status: RunState::Pending,
            steps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStep {
    pub name: String,
    pub status: RunState,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_ids_are_unique_canonical_uuids() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);

        let rendered = a.to_string();
        assert_eq!(rendered.len(), 36);
        assert_eq!(Uuid::parse_str(&rendered).unwrap(), *a.as_uuid());
    }

    #[test]
    fn run_id_serializes_as_plain_string() {
        let id = RunId::new();
        assert_eq!(serde_json::to_value(id).unwrap(), json!(id.to_string()));
    }

    #[test]
    fn pending_status_shape() {
        let value = serde_json::to_value(RunStatus::pending("run-1")).unwrap();
        assert_eq!(
            value,
            json!({ "runId": "run-1", "status": "PENDING", "steps": [] })
        );
    }

    #[test]
    fn step_omits_empty_artifacts() {
        let step = RunStep {
            name: "render".into(),
            status: RunState::Succeeded,
            updated_at: Utc::now(),
            artifacts: Vec::new(),
        };
        let value = serde_json::to_value(step).unwrap();
        assert_eq!(value["status"], "SUCCEEDED");
        assert!(value.get("artifacts").is_none());
        assert!(value.get("updatedAt").is_some());
    }
}
