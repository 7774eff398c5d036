//! # Shift Reports - Scheduling Report Service
//!
//! Aggregate reports over staff scheduling data (leave, on-call load,
//! overtime, worked hours, shift preference fulfillment, monthly shift
//! volume), built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: The parameterized query engine (binder, condition compiler,
//!   clause assembler) and its value types
//! - **Application**: Report catalog, filter validation, use case and ports
//! - **Infrastructure**: Postgres executor and row decoding
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```
//! use shift_reports::application::{dto::ReportFilters, reports::build_report_query};
//! use shift_reports::value_objects::ReportKind;
//!
//! let filters = ReportFilters::new()
//!     .with("start_date", "2024-01-01")
//!     .with("end_date", "2024-01-31")
//!     .with("department", "ICU");
//!
//! let query = build_report_query(ReportKind::WorkHours, &filters).unwrap();
//! assert_eq!(query.params().len(), 3);
//! assert!(query.sql().contains("d.name IN ($3)"));
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{query, value_objects};
