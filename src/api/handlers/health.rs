use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

use super::health_checks::{check_database_connectivity, DatabaseStatus};

const SERVICE: &str = "shift_reports";
const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Basic health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Database readiness response
#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
/// Basic health check endpoint (no database check)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: SERVICE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// GET /health/ready
/// Readiness probe with database connectivity check
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness_handler(
    State(pool): State<Arc<PgPool>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let status = check_database_connectivity(pool.as_ref(), READINESS_TIMEOUT).await;
    readiness_response(status)
}

fn readiness_response(status: DatabaseStatus) -> (StatusCode, Json<ReadinessResponse>) {
    let not_ready = |database: &str, error: String| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "not_ready".to_string(),
                service: SERVICE.to_string(),
                database: database.to_string(),
                response_time_ms: None,
                error: Some(error),
            }),
        )
    };

    match status {
        DatabaseStatus::Connected(elapsed) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready".to_string(),
                service: SERVICE.to_string(),
                database: "connected".to_string(),
                response_time_ms: Some(elapsed.as_millis() as u64),
                error: None,
            }),
        ),
        DatabaseStatus::Disconnected(reason) => {
            not_ready("disconnected", format!("Database error: {}", reason))
        }
        DatabaseStatus::TimedOut => not_ready(
            "timeout",
            format!(
                "Database query timed out after {} seconds",
                READINESS_TIMEOUT.as_secs()
            ),
        ),
    }
}
