mod report_executor;

pub use report_executor::{ExecutorError, ReportExecutor};

#[cfg(test)]
pub use report_executor::MockReportExecutor;
