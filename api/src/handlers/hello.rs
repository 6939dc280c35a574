//! Liveness endpoints

use axum::Json;
use serde::Serialize;

/// GET /api/hello
pub async fn hello() -> &'static str {
    "Hello, World!"
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
