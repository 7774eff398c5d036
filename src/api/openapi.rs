use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    HoursWorkedRecord, LeaveAnalysisRecord, MonthlyShiftRecord, OnCallWorkloadRecord,
    OvertimeRecord, ReportDescriptor, ShiftPreferenceRecord,
};

/// OpenAPI specification for the reporting API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shift Reports API",
        version = "1.0.0",
        description = "Aggregate reports over staff scheduling data"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::reports::list_reports_handler,
        crate::api::handlers::reports::report_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadinessResponse,
            ReportDescriptor,
            LeaveAnalysisRecord,
            OnCallWorkloadRecord,
            OvertimeRecord,
            ShiftPreferenceRecord,
            HoursWorkedRecord,
            MonthlyShiftRecord,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reports", description = "Scheduling reports")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/reports"));
        assert!(doc.paths.paths.contains_key("/reports/{report}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }

    #[test]
    fn test_openapi_registers_record_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;
        for name in ["LeaveAnalysisRecord", "MonthlyShiftRecord", "ReportDescriptor"] {
            assert!(schemas.contains_key(name), "{}", name);
        }
    }
}
