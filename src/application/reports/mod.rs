//! Report catalog.
//!
//! Each report is a static [`ReportDefinition`]: a query template plus the
//! filters it accepts. Building a report query is validation followed by
//! assembly; nothing here touches the database.

mod leave_analysis;
mod monthly_shifts;
mod oncall_analysis;
mod overtime;
mod shift_preference;
mod work_hours;

use crate::application::dto::ReportFilters;
use crate::application::validation::validate_filters;
use crate::domain::errors::FilterError;
use crate::domain::query::{BuiltQuery, ClauseAssembler, QueryTemplate, Section};
use crate::domain::value_objects::{ReportKind, ValueType};

/// Reporting period bounds, required by every report
pub const START_DATE: &str = "start_date";
pub const END_DATE: &str = "end_date";

/// How the reporting period constrains a report's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodTarget {
    /// `column >= start AND column <= end`
    Range { column: &'static str },
    /// Null-safe overlap with a validity window (or a single nullable
    /// column used as both ends)
    Overlap {
        start_column: &'static str,
        end_column: &'static str,
    },
}

/// An optional filter a report accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Single typed value compared for equality
    Equality {
        field: &'static str,
        column: &'static str,
        value: ValueType,
    },
    /// Repeated text values, any of which may match
    Membership {
        field: &'static str,
        column: &'static str,
        null_passes: bool,
    },
    /// Independent lower/upper bounds on an expression
    Range {
        min_field: &'static str,
        max_field: &'static str,
        expr: &'static str,
        value: ValueType,
        section: Section,
    },
    /// `field=true` keeps only groups where `expr` is positive
    Presence {
        field: &'static str,
        expr: &'static str,
    },
}

impl FilterRule {
    /// Query-string names this filter reads
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            FilterRule::Equality { field, .. }
            | FilterRule::Membership { field, .. }
            | FilterRule::Presence { field, .. } => vec![*field],
            FilterRule::Range {
                min_field,
                max_field,
                ..
            } => vec![*min_field, *max_field],
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportDefinition {
    pub kind: ReportKind,
    pub template: QueryTemplate,
    pub period: &'static [PeriodTarget],
    /// Optional filters in compilation order
    pub filters: &'static [FilterRule],
}

impl ReportDefinition {
    pub fn for_kind(kind: ReportKind) -> &'static ReportDefinition {
        match kind {
            ReportKind::LeaveAnalysis => &leave_analysis::DEFINITION,
            ReportKind::OnCallAnalysis => &oncall_analysis::DEFINITION,
            ReportKind::Overtime => &overtime::DEFINITION,
            ReportKind::ShiftPreference => &shift_preference::DEFINITION,
            ReportKind::WorkHours => &work_hours::DEFINITION,
            ReportKind::MonthlyShifts => &monthly_shifts::DEFINITION,
        }
    }

    /// Every filter name this report understands, period bounds first
    pub fn accepted_filters(&self) -> Vec<&'static str> {
        let mut names = vec![START_DATE, END_DATE];
        names.extend(self.filters.iter().flat_map(FilterRule::names));
        names
    }

    /// Validate `filters` and assemble the parameterized statement
    pub fn build_query(&self, filters: &ReportFilters) -> Result<BuiltQuery, FilterError> {
        let criteria = validate_filters(self, filters)?;
        Ok(ClauseAssembler::new(&self.template).assemble(&criteria))
    }
}

/// Build the statement for `kind` from raw request filters
pub fn build_report_query(
    kind: ReportKind,
    filters: &ReportFilters,
) -> Result<BuiltQuery, FilterError> {
    ReportDefinition::for_kind(kind).build_query(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BindValue;
    use chrono::NaiveDate;

    fn period() -> ReportFilters {
        ReportFilters::new()
            .with(START_DATE, "2024-01-01")
            .with(END_DATE, "2024-01-31")
    }

    fn date(y: i32, m: u32, d: u32) -> BindValue {
        BindValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_every_kind_has_matching_definition() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportDefinition::for_kind(kind).kind, kind);
        }
    }

    #[test]
    fn test_every_report_requires_period() {
        for kind in ReportKind::ALL {
            let err = build_report_query(kind, &ReportFilters::new()).unwrap_err();
            assert_eq!(err, FilterError::MissingRequiredFilter(START_DATE.to_string()));

            let only_start = ReportFilters::new().with(START_DATE, "2024-01-01");
            let err = build_report_query(kind, &only_start).unwrap_err();
            assert_eq!(err, FilterError::MissingRequiredFilter(END_DATE.to_string()));
        }
    }

    #[test]
    fn test_every_report_builds_with_period_only() {
        for kind in ReportKind::ALL {
            let query = build_report_query(kind, &period()).unwrap();
            assert!(query.sql().starts_with("SELECT"), "{}", kind);
            assert!(query.sql().contains("$1"), "{}", kind);
            assert!(!query.sql().contains("2024-01"), "{}", kind);
        }
    }

    #[test]
    fn test_accepted_filters_lists_range_bounds() {
        let names = ReportDefinition::for_kind(ReportKind::WorkHours).accepted_filters();
        assert_eq!(
            names,
            vec![START_DATE, END_DATE, "role", "department", "min_hours", "max_hours"]
        );
    }

    #[test]
    fn test_work_hours_window_only() {
        let query = build_report_query(ReportKind::WorkHours, &period()).unwrap();

        assert!(query.sql().contains("sh.date >= $1"));
        assert!(query.sql().contains("sh.date <= $2"));
        assert!(query.sql().contains("sl.check_in IS NOT NULL"));
        assert!(!query.sql().contains("HAVING"));
        assert_eq!(
            query.params().as_slice(),
            &[date(2024, 1, 1), date(2024, 1, 31)]
        );
    }

    #[test]
    fn test_work_hours_departments_and_min_hours() {
        let filters = period()
            .with("department", "A")
            .with("department", "B")
            .with("min_hours", "10");

        let query = build_report_query(ReportKind::WorkHours, &filters).unwrap();

        assert!(query.sql().contains("d.name IN ($3, $4)"));
        let having = &query.sql()[query.sql().find("HAVING").unwrap()..];
        assert!(having.contains(">= $5"));
        assert!(having.contains("SUM("));
        assert_eq!(query.params().len(), 5);
        assert_eq!(query.params().as_slice()[4], BindValue::Decimal(10.0));
    }

    #[test]
    fn test_work_hours_rejects_non_numeric_hours() {
        let filters = period().with("min_hours", "abc");
        let err = build_report_query(ReportKind::WorkHours, &filters).unwrap_err();
        assert_eq!(err.field(), "min_hours");
    }

    #[test]
    fn test_leave_analysis_overlap_binds_both_windows() {
        let query = build_report_query(ReportKind::LeaveAnalysis, &period()).unwrap();

        assert!(query
            .sql()
            .contains("(lr.start_date IS NULL OR lr.start_date <= $1)"));
        assert!(query
            .sql()
            .contains("(sd.end_date IS NULL OR sd.end_date >= $4)"));
        assert_eq!(
            query.params().as_slice(),
            &[
                date(2024, 1, 31),
                date(2024, 1, 1),
                date(2024, 1, 31),
                date(2024, 1, 1)
            ]
        );
    }

    #[test]
    fn test_leave_analysis_duration_restates_expression() {
        let filters = period().with("min_duration", "3");
        let query = build_report_query(ReportKind::LeaveAnalysis, &filters).unwrap();

        assert!(query
            .sql()
            .contains("(COALESCE(lr.end_date, CURRENT_DATE) - lr.start_date) >= $5"));
        assert!(!query.sql().contains("duration_days >="));
    }

    #[test]
    fn test_oncall_groups_before_having() {
        let filters = period()
            .with("min_on_call_shifts", "2")
            .with("has_assignments", "TRUE");
        let sql = build_report_query(ReportKind::OnCallAnalysis, &filters)
            .unwrap()
            .sql()
            .to_string();

        let group = sql.find("GROUP BY").unwrap();
        let having = sql.find("HAVING").unwrap();
        let order = sql.find("ORDER BY").unwrap();
        assert!(group < having && having < order);
        assert!(sql.contains("COUNT(sa.id) > 0"));
        assert!(sql.ends_with("ORDER BY on_call_percentage DESC"));
    }

    #[test]
    fn test_has_assignments_other_than_true_is_ignored() {
        let filters = period().with("has_assignments", "yes");
        let sql = build_report_query(ReportKind::OnCallAnalysis, &filters)
            .unwrap()
            .sql()
            .to_string();
        assert!(!sql.contains("HAVING"));
    }

    #[test]
    fn test_shift_preference_staff_id_must_be_integer() {
        let filters = period().with("staff_id", "seven");
        let err = build_report_query(ReportKind::ShiftPreference, &filters).unwrap_err();
        assert_eq!(err.field(), "staff_id");

        let filters = period().with("staff_id", "7");
        let query = build_report_query(ReportKind::ShiftPreference, &filters).unwrap();
        assert!(query.sql().contains("s.id = $5"));
        assert_eq!(query.params().as_slice()[4], BindValue::Integer(7));
    }

    #[test]
    fn test_shift_preference_assigned_time_tolerates_null() {
        let filters = period().with("assigned_shift_time", "Night");
        let query = build_report_query(ReportKind::ShiftPreference, &filters).unwrap();
        assert!(query
            .sql()
            .contains("(st_assigned.name IS NULL OR st_assigned.name IN ($5))"));
    }

    #[test]
    fn test_monthly_shifts_filters_shift_type_as_text() {
        let filters = period().with("shift_type", "on-call").with("shift_time", "Day");
        let query = build_report_query(ReportKind::MonthlyShifts, &filters).unwrap();

        assert!(query.sql().contains("sa.shift_type::TEXT IN ($3)"));
        assert!(query.sql().contains("st.name IN ($4)"));
        assert!(query.sql().ends_with("ORDER BY assignment_year, assignment_month"));
    }
}
