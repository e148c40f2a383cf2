//! Liveness endpoints

use axum::Json;
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
    pub status: String,
}

#[allow(missing_docs)]
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

/// GET / - Greeting
pub async fn hello_world() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello from Agent Studio Backend!".to_string(),
        status: "ok".to_string(),
    })
}

/// GET /api/health - Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}
