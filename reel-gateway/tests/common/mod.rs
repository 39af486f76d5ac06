#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use reel_gateway::config::GatewayConfig;
use reel_gateway::services::{InMemoryQueueClient, PendingRunStatusStore, SecretBundle};
use reel_gateway::startup::{build_router, AppState, Application};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

/// Configuration built from `pairs` only; the process environment is ignored.
pub fn test_config(pairs: &[(&str, &str)]) -> GatewayConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let common = CoreConfig {
        port: 0, // Random port for testing
        log_level: "info".to_string(),
    };

    GatewayConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn test_state(queue: Arc<InMemoryQueueClient>) -> AppState {
    AppState::new(
        test_config(&[("QUEUE_BACKEND", "memory")]),
        SecretBundle::default(),
        queue,
        Arc::new(PendingRunStatusStore),
    )
}

pub fn test_router(queue: Arc<InMemoryQueueClient>) -> Router {
    build_router(test_state(queue))
}

/// Sends a single request through `router`.
pub async fn send(router: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}

/// The smallest request the gateway accepts in practice.
pub fn minimal_reel_request() -> Value {
    json!({
        "projectId": "proj_789",
        "icp": { "industry": "Digital marketing", "audiencePainPoints": ["time"] },
        "idea": "x",
        "fluxModel": { "loraUrl": "https://v3.fal.media/files/elephant/lora.safetensors" },
        "fluxPrompt": { "prompt": "y" }
    })
}

/// A request with every optional section filled in.
pub fn full_reel_request() -> Value {
    json!({
        "projectId": "proj_789",
        "icp": {
            "industry": "Digital marketing",
            "audiencePainPoints": ["Creating consistent content takes too much time"],
            "desiredOutcome": "Effortlessly generate high-quality AI twin reels to scale content production"
        },
        "idea": "Show how AI twins let you create reels in minutes instead of hours",
        "fluxModel": {
            "loraUrl": "https://v3.fal.media/files/elephant/T6tBgeMb8efOTD9xv2cif_pytorch_lora_weights.safetensors",
            "cfgScale": 8.0,
            "steps": 30
        },
        "fluxPrompt": {
            "prompt": "Professional digital marketer in modern home office setup",
            "negativePrompt": "blurry, low-resolution",
            "aspectRatio": "9:16",
            "batchSize": 4
        },
        "klingPreferences": {
            "stylePreset": "cinematic",
            "guidanceScale": 0.5,
            "durationSeconds": 5.0
        },
        "captionPreferences": {
            "hookStyle": "question",
            "bodyStyle": "story",
            "callToAction": { "type": "comment", "keyword": "TWIN" }
        }
    })
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub queue: Arc<InMemoryQueueClient>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let queue = Arc::new(InMemoryQueueClient::new());

        let app = Application::build_with(
            test_config(&[("QUEUE_BACKEND", "memory")]),
            SecretBundle::default(),
            queue.clone(),
            Arc::new(PendingRunStatusStore),
        )
        .await
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            queue,
        }
    }
}
