use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

/// Liveness probe; the only unauthenticated endpoint besides register/login
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "success",
        message: "lernio backend is running",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
