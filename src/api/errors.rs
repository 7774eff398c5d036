use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::api::handlers::health_checks::sanitize_db_error;
use crate::application::errors::ReportUseCaseError;
use crate::application::ports::ExecutorError;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Driver details go to the log, never to the client
impl From<ReportUseCaseError> for ApiError {
    fn from(err: ReportUseCaseError) -> Self {
        match err {
            ReportUseCaseError::Filter(e) => ApiError::bad_request(e.to_string()),
            ReportUseCaseError::Executor(ExecutorError::Execution(e)) => {
                error!(error = %e, "report_execution_failed");
                ApiError::internal_error(sanitize_db_error(&e))
            }
            ReportUseCaseError::Executor(ExecutorError::Decoding { row, cause }) => {
                error!(row, cause = %cause, "report_decoding_failed");
                ApiError::internal_error("Failed to decode report results")
            }
        }
    }
}
