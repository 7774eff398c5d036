use axum::{middleware as axum_middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;

use crate::api::handlers::{health_handler, list_reports_handler, readiness_handler, report_handler};
use crate::api::middleware::{cors, request_log};
use crate::api::openapi::swagger_ui;
use crate::application::use_cases::RunReportUseCase;
use crate::config::Config;

/// Application state container
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub report_use_case: Arc<RunReportUseCase>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(Arc::clone(&state.pool)),
        )
        .route("/reports", get(list_reports_handler))
        .route(
            "/reports/{report}",
            get(report_handler).with_state(Arc::clone(&state.report_use_case)),
        )
        .merge(swagger_ui())
        .layer(cors::create_cors_layer_for_config(&state.config))
        .layer(axum_middleware::from_fn(request_log::request_log_middleware))
}
