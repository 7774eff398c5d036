use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::dto::{HoursWorkedRecord, ReportDescriptor, ReportFilters, ReportRows};
use crate::application::reports::{ReportDefinition, END_DATE, START_DATE};
use crate::application::use_cases::RunReportUseCase;
use crate::domain::value_objects::ReportKind;

/// GET /reports
/// List the available reports and their filters
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    responses(
        (status = 200, description = "Report catalog", body = [ReportDescriptor])
    )
)]
pub async fn list_reports_handler() -> Json<Vec<ReportDescriptor>> {
    let catalog = ReportKind::ALL
        .iter()
        .map(|kind| {
            let definition = ReportDefinition::for_kind(*kind);
            let required = [START_DATE, END_DATE];

            ReportDescriptor {
                report: kind.slug().to_string(),
                required_filters: required.iter().map(|f| f.to_string()).collect(),
                optional_filters: definition
                    .accepted_filters()
                    .into_iter()
                    .filter(|f| !required.contains(f))
                    .map(str::to_string)
                    .collect(),
            }
        })
        .collect();

    Json(catalog)
}

/// GET /reports/{report}
/// Run one report.
///
/// Multi-valued filters repeat their key (`department=ICU&department=ER`).
#[utoipa::path(
    get,
    path = "/reports/{report}",
    tag = "reports",
    params(
        ("report" = String, Path, description = "leave-analysis, oncall-analysis, overtime, shift-preference, work-hours or monthly-shifts"),
        ("start_date" = String, Query, description = "Period start (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Period end (YYYY-MM-DD)"),
        ("department" = Option<Vec<String>>, Query, description = "Department names, repeatable"),
        ("role" = Option<Vec<String>>, Query, description = "Role names, repeatable")
    ),
    responses(
        (status = 200, description = "Report rows; the element shape depends on the report", body = [HoursWorkedRecord]),
        (status = 400, description = "Missing or malformed filter"),
        (status = 404, description = "Unknown report"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn report_handler(
    State(use_case): State<Arc<RunReportUseCase>>,
    Path(report): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ReportRows>, ApiError> {
    let kind = report.parse::<ReportKind>().map_err(ApiError::not_found)?;
    let filters: ReportFilters = params.into_iter().collect();

    let rows = use_case.execute(kind, &filters).await?;

    Ok(Json(rows))
}
