use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::ReportKind;

/// Raw filter values of one report request, keyed by filter name.
///
/// Repeated keys keep their arrival order. Empty strings are kept as
/// received but ignored by the accessors, so `role=` means the same as
/// omitting `role`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    values: BTreeMap<String, Vec<String>>,
}

impl ReportFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `name`
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// First non-empty value supplied for `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        self.all(name).into_iter().next()
    }

    /// All non-empty values supplied for `name`, in arrival order
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.values
            .get(name)
            .map(|values| {
                values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names of every supplied filter
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ReportFilters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = ReportFilters::new();
        for (name, value) in iter {
            filters.push(name, value);
        }
        filters
    }
}

/// A report and the filters it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportDescriptor {
    /// Path segment under `/reports/`
    pub report: String,
    pub required_filters: Vec<String>,
    pub optional_filters: Vec<String>,
}

/// Leave request overlapping the reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveAnalysisRecord {
    pub staff_name: String,
    pub role_name: String,
    pub department_name: String,
    pub start_date: NaiveDate,
    /// Absent while the leave is open-ended
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub duration_days: i64,
}

/// On-call load of one staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OnCallWorkloadRecord {
    pub staff_id: i64,
    pub staff_name: String,
    pub role_name: String,
    /// Comma-separated department names, absent without assignments
    pub departments: Option<String>,
    pub total_shifts_assigned: i64,
    pub on_call_shifts_assigned: i64,
    /// 0 when the staff member has no assignments
    pub on_call_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OvertimeRecord {
    pub staff_name: String,
    pub role_name: String,
    pub department_name: String,
    /// Hours
    pub total_overtime: f64,
}

/// Shift preference fulfillment of one staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShiftPreferenceRecord {
    pub staff_id: i64,
    pub staff_name: String,
    pub role_name: String,
    pub departments: Option<String>,
    pub preferred_shift_times: Option<String>,
    pub total_assignments_count: i64,
    pub preferred_shift_assignments_count: i64,
    /// Ratio in `[0, 1]`; 0 when the staff member has no assignments
    pub preference_fulfillment_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HoursWorkedRecord {
    pub staff_name: String,
    pub role_name: String,
    pub department_name: String,
    pub total_hours_worked: f64,
}

/// Shift assignment count for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyShiftRecord {
    pub assignment_year: i32,
    pub assignment_month: i32,
    /// `YYYY-MM`
    pub assignment_month_year: String,
    pub total_shifts: i64,
}

/// Decoded result set of one report, serialized as a plain JSON array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    LeaveAnalysis(Vec<LeaveAnalysisRecord>),
    OnCallAnalysis(Vec<OnCallWorkloadRecord>),
    Overtime(Vec<OvertimeRecord>),
    ShiftPreference(Vec<ShiftPreferenceRecord>),
    WorkHours(Vec<HoursWorkedRecord>),
    MonthlyShifts(Vec<MonthlyShiftRecord>),
}

impl ReportRows {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportRows::LeaveAnalysis(_) => ReportKind::LeaveAnalysis,
            ReportRows::OnCallAnalysis(_) => ReportKind::OnCallAnalysis,
            ReportRows::Overtime(_) => ReportKind::Overtime,
            ReportRows::ShiftPreference(_) => ReportKind::ShiftPreference,
            ReportRows::WorkHours(_) => ReportKind::WorkHours,
            ReportRows::MonthlyShifts(_) => ReportKind::MonthlyShifts,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportRows::LeaveAnalysis(rows) => rows.len(),
            ReportRows::OnCallAnalysis(rows) => rows.len(),
            ReportRows::Overtime(rows) => rows.len(),
            ReportRows::ShiftPreference(rows) => rows.len(),
            ReportRows::WorkHours(rows) => rows.len(),
            ReportRows::MonthlyShifts(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
