/// Liveness probe. Deliberately independent of configuration, secrets and
/// the queue.
pub async fn health_check() -> &'static str {
    "OK"
}
