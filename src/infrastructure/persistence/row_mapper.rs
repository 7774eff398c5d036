//! Row decoding for report result sets.
//!
//! Every record type has a raw row (`sqlx::FromRow`, nullable where the
//! query can produce NULL) and a pure conversion into the record. The first
//! row that fails aborts the whole set.

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, FromRow};

use crate::application::dto::{
    HoursWorkedRecord, LeaveAnalysisRecord, MonthlyShiftRecord, OnCallWorkloadRecord,
    OvertimeRecord, ShiftPreferenceRecord,
};
use crate::application::ports::ExecutorError;

/// A record decodable from one result row
pub trait DecodeRow: Sized {
    type Raw: for<'r> FromRow<'r, PgRow>;

    /// Convert a raw row, failing on a NULL in a required column
    fn from_raw(raw: Self::Raw) -> Result<Self, String>;
}

/// Decode every row, reporting the index of the first failure
pub fn decode_rows<T: DecodeRow>(rows: &[PgRow]) -> Result<Vec<T>, ExecutorError> {
    collect_decoded::<T>(rows.iter().map(|row| T::Raw::from_row(row)))
}

fn collect_decoded<T: DecodeRow>(
    raws: impl IntoIterator<Item = Result<T::Raw, sqlx::Error>>,
) -> Result<Vec<T>, ExecutorError> {
    raws.into_iter()
        .enumerate()
        .map(|(index, raw)| {
            raw.map_err(|e| e.to_string())
                .and_then(T::from_raw)
                .map_err(|cause| ExecutorError::Decoding { row: index, cause })
        })
        .collect()
}

fn required<T>(value: Option<T>, column: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("column {} was NULL", column))
}

#[derive(Debug, Default, FromRow)]
pub struct LeaveAnalysisRow {
    staff_name: Option<String>,
    role_name: Option<String>,
    department_name: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: Option<String>,
    duration_days: Option<i64>,
}

impl DecodeRow for LeaveAnalysisRecord {
    type Raw = LeaveAnalysisRow;

    fn from_raw(raw: LeaveAnalysisRow) -> Result<Self, String> {
        Ok(Self {
            staff_name: required(raw.staff_name, "staff_name")?,
            role_name: required(raw.role_name, "role_name")?,
            department_name: required(raw.department_name, "department_name")?,
            start_date: required(raw.start_date, "start_date")?,
            end_date: raw.end_date,
            status: required(raw.status, "status")?,
            duration_days: required(raw.duration_days, "duration_days")?,
        })
    }
}

#[derive(Debug, Default, FromRow)]
pub struct OnCallWorkloadRow {
    staff_id: Option<i64>,
    staff_name: Option<String>,
    role_name: Option<String>,
    departments: Option<String>,
    total_shifts_assigned: Option<i64>,
    on_call_shifts_assigned: Option<i64>,
    on_call_percentage: Option<f64>,
}

impl DecodeRow for OnCallWorkloadRecord {
    type Raw = OnCallWorkloadRow;

    fn from_raw(raw: OnCallWorkloadRow) -> Result<Self, String> {
        Ok(Self {
            staff_id: required(raw.staff_id, "staff_id")?,
            staff_name: required(raw.staff_name, "staff_name")?,
            role_name: required(raw.role_name, "role_name")?,
            departments: raw.departments,
            total_shifts_assigned: raw.total_shifts_assigned.unwrap_or(0),
            on_call_shifts_assigned: raw.on_call_shifts_assigned.unwrap_or(0),
            on_call_percentage: raw.on_call_percentage.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Default, FromRow)]
pub struct OvertimeRow {
    staff_name: Option<String>,
    role_name: Option<String>,
    department_name: Option<String>,
    total_overtime_hours: Option<f64>,
}

impl DecodeRow for OvertimeRecord {
    type Raw = OvertimeRow;

    fn from_raw(raw: OvertimeRow) -> Result<Self, String> {
        Ok(Self {
            staff_name: required(raw.staff_name, "staff_name")?,
            role_name: required(raw.role_name, "role_name")?,
            department_name: required(raw.department_name, "department_name")?,
            total_overtime: raw.total_overtime_hours.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Default, FromRow)]
pub struct ShiftPreferenceRow {
    staff_id: Option<i64>,
    staff_name: Option<String>,
    role_name: Option<String>,
    departments: Option<String>,
    preferred_shift_times: Option<String>,
    total_assignments_count: Option<i64>,
    preferred_shift_assignments_count: Option<i64>,
    preference_fulfillment_rate: Option<f64>,
}

impl DecodeRow for ShiftPreferenceRecord {
    type Raw = ShiftPreferenceRow;

    fn from_raw(raw: ShiftPreferenceRow) -> Result<Self, String> {
        Ok(Self {
            staff_id: required(raw.staff_id, "staff_id")?,
            staff_name: required(raw.staff_name, "staff_name")?,
            role_name: required(raw.role_name, "role_name")?,
            departments: raw.departments,
            preferred_shift_times: raw.preferred_shift_times,
            total_assignments_count: raw.total_assignments_count.unwrap_or(0),
            preferred_shift_assignments_count: raw.preferred_shift_assignments_count.unwrap_or(0),
            preference_fulfillment_rate: raw.preference_fulfillment_rate.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Default, FromRow)]
pub struct HoursWorkedRow {
    staff_name: Option<String>,
    role_name: Option<String>,
    department_name: Option<String>,
    total_hours_worked: Option<f64>,
}

impl DecodeRow for HoursWorkedRecord {
    type Raw = HoursWorkedRow;

    fn from_raw(raw: HoursWorkedRow) -> Result<Self, String> {
        Ok(Self {
            staff_name: required(raw.staff_name, "staff_name")?,
            role_name: required(raw.role_name, "role_name")?,
            department_name: required(raw.department_name, "department_name")?,
            total_hours_worked: raw.total_hours_worked.unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Default, FromRow)]
pub struct MonthlyShiftRow {
    assignment_year: Option<i32>,
    assignment_month: Option<i32>,
    assignment_month_year: Option<String>,
    total_shifts: Option<i64>,
}

impl DecodeRow for MonthlyShiftRecord {
    type Raw = MonthlyShiftRow;

    fn from_raw(raw: MonthlyShiftRow) -> Result<Self, String> {
        Ok(Self {
            assignment_year: required(raw.assignment_year, "assignment_year")?,
            assignment_month: required(raw.assignment_month, "assignment_month")?,
            assignment_month_year: required(raw.assignment_month_year, "assignment_month_year")?,
            total_shifts: raw.total_shifts.unwrap_or(0),
        })
    }
}
