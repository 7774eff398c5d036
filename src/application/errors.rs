//! Error type for the report use case

use thiserror::Error;

use crate::application::ports::ExecutorError;
use crate::domain::errors::FilterError;

#[derive(Debug, Error)]
pub enum ReportUseCaseError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl ReportUseCaseError {
    /// Bad input rather than a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, ReportUseCaseError::Filter(_))
    }
}
