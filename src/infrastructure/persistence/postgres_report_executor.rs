use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::Query,
    PgPool, Postgres,
};
use tracing::debug;

use super::row_mapper::decode_rows;
use crate::application::dto::ReportRows;
use crate::application::ports::{ExecutorError, ReportExecutor};
use crate::domain::query::{BuiltQuery, ParameterList};
use crate::domain::value_objects::{BindValue, ReportKind};

pub struct PostgresReportExecutor {
    pool: PgPool,
}

impl PostgresReportExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Bind every value in placeholder order
fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q ParameterList,
) -> Query<'q, Postgres, PgArguments> {
    for value in params {
        query = match value {
            BindValue::Text(v) => query.bind(v.as_str()),
            BindValue::Integer(v) => query.bind(*v),
            BindValue::Decimal(v) => query.bind(*v),
            BindValue::Date(v) => query.bind(*v),
        };
    }
    query
}

fn decode(kind: ReportKind, rows: &[PgRow]) -> Result<ReportRows, ExecutorError> {
    Ok(match kind {
        ReportKind::LeaveAnalysis => ReportRows::LeaveAnalysis(decode_rows(rows)?),
        ReportKind::OnCallAnalysis => ReportRows::OnCallAnalysis(decode_rows(rows)?),
        ReportKind::Overtime => ReportRows::Overtime(decode_rows(rows)?),
        ReportKind::ShiftPreference => ReportRows::ShiftPreference(decode_rows(rows)?),
        ReportKind::WorkHours => ReportRows::WorkHours(decode_rows(rows)?),
        ReportKind::MonthlyShifts => ReportRows::MonthlyShifts(decode_rows(rows)?),
    })
}

#[async_trait]
impl ReportExecutor for PostgresReportExecutor {
    async fn fetch(&self, kind: ReportKind, query: &BuiltQuery) -> Result<ReportRows, ExecutorError> {
        let rows = bind_params(sqlx::query(query.sql()), query.params())
            .fetch_all(&self.pool)
            .await?;

        debug!(report = %kind, rows = rows.len(), "report_rows_fetched");

        decode(kind, &rows)
    }
}
