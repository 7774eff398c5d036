use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::ReportRows;
use crate::domain::query::BuiltQuery;
use crate::domain::value_objects::ReportKind;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Database error: {0}")]
    Execution(#[from] sqlx::Error),

    /// The whole result set is discarded
    #[error("Failed to decode row {row}: {cause}")]
    Decoding { row: usize, cause: String },
}

/// Port for running a built report statement
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportExecutor: Send + Sync {
    /// Execute `query` and decode every row as a record of `kind`
    async fn fetch(&self, kind: ReportKind, query: &BuiltQuery) -> Result<ReportRows, ExecutorError>;
}
