pub mod health;
pub mod health_checks;
pub mod reports;


pub use health::{health_handler, readiness_handler};
pub use reports::{list_reports_handler, report_handler};
