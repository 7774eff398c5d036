mod postgres_report_executor;
mod row_mapper;

pub use postgres_report_executor::PostgresReportExecutor;
pub use row_mapper::{decode_rows, DecodeRow};
