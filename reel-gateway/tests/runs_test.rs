mod common;

use axum::http::StatusCode;
use common::{body_json, send, test_router};
use reel_gateway::services::InMemoryQueueClient;
use serde_json::json;
use std::sync::Arc;

fn router() -> axum::Router {
    test_router(Arc::new(InMemoryQueueClient::new()))
}

#[tokio::test]
async fn get_run_status_returns_pending_stub() {
    let response = send(router(), "GET", "/runs/run-123", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "runId": "run-123", "status": "PENDING", "steps": [] })
    );
}

#[tokio::test]
async fn run_id_is_echoed_without_trimming() {
    let response = send(router(), "GET", "/runs/%20abc", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["runId"], " abc");
}

#[tokio::test]
async fn missing_run_id_is_400() {
    for uri in ["/runs/", "/runs", "/runs/%20"] {
        let response = send(router(), "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body_json(response).await["error"], "Missing runId");
    }
}

#[tokio::test]
async fn wrong_method_is_405() {
    for method in ["POST", "PUT", "DELETE"] {
        let response = send(router(), method, "/runs/run-123", None).await;
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method: {}",
            method
        );
    }
}

#[tokio::test]
async fn accepted_run_can_be_polled() {
    let queue = Arc::new(InMemoryQueueClient::new());
    let body = common::minimal_reel_request().to_string();

    let accepted = body_json(send(test_router(queue.clone()), "POST", "/reels", Some(&body)).await).await;
    let run_id = accepted["runId"].as_str().unwrap();

    let response = send(test_router(queue), "GET", &format!("/runs/{}", run_id), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["runId"], run_id);
    assert_eq!(status["status"], "PENDING");
}
