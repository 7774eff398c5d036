mod bind_value;
mod report_kind;

pub use bind_value::{BindValue, ValueType};
pub use report_kind::ReportKind;
