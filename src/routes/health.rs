/**
 * Health Routes
 * Liveness ping for deploy and uptime checks
 */
use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;

lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Pin the server start time; called once from run()
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime: u64,
}

/// GET /health
pub async fn health_ping() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime: SERVER_START.elapsed().as_secs(),
    })
}
