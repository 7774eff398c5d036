use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::{ReportFilters, ReportRows};
use crate::application::errors::ReportUseCaseError;
use crate::application::ports::ReportExecutor;
use crate::application::reports::build_report_query;
use crate::domain::value_objects::ReportKind;

/// Use case: run one report
pub struct RunReportUseCase {
    executor: Arc<dyn ReportExecutor>,
}

impl RunReportUseCase {
    pub fn new(executor: Arc<dyn ReportExecutor>) -> Self {
        Self { executor }
    }

    /// Validate, build and execute the report. Invalid filters are rejected
    /// before the executor is called.
    pub async fn execute(
        &self,
        kind: ReportKind,
        filters: &ReportFilters,
    ) -> Result<ReportRows, ReportUseCaseError> {
        let query = build_report_query(kind, filters)?;

        // Parameter values are never logged
        debug!(
            report = %kind,
            sql = %query.sql(),
            parameters = query.params().len(),
            "report_query_built"
        );

        let rows = self.executor.fetch(kind, &query).await?;

        info!(report = %kind, rows = rows.len(), "report_completed");

        Ok(rows)
    }
}
