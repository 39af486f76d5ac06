//! reel-gateway: HTTP intake for reel generation requests.
//!
//! Accepts `POST /reels`, assigns a run id, publishes the request to the
//! command queue and answers `202 Accepted`. Run progress is polled through
//! `GET /runs/{runId}`.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::AppState;
