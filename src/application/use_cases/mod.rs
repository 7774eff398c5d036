mod run_report;

pub use run_report::RunReportUseCase;
