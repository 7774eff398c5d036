use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::{QueryTemplate, Section};
use crate::domain::value_objects::{ReportKind, ValueType};

// Open-ended leave counts up to today.
macro_rules! duration_days {
    () => {
        "(COALESCE(lr.end_date, CURRENT_DATE) - lr.start_date)"
    };
}

const SELECT: &str = concat!(
    r#"
SELECT
    s.name AS staff_name,
    r.name AS role_name,
    d.name AS department_name,
    lr.start_date AS start_date,
    lr.end_date AS end_date,
    lr.status::TEXT AS status,
    "#,
    duration_days!(),
    r#"::BIGINT AS duration_days
FROM leave_requests lr
JOIN staff s ON lr.staff_id = s.id
JOIN roles r ON s.role_id = r.id
JOIN staff_departments sd ON s.id = sd.staff_id
JOIN departments d ON sd.department_id = d.id
"#
);

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::LeaveAnalysis,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &[],
        group_by: &[],
        order_by: "lr.start_date",
    },
    period: &[
        PeriodTarget::Overlap {
            start_column: "lr.start_date",
            end_column: "lr.end_date",
        },
        // Department membership must have been valid during the period
        PeriodTarget::Overlap {
            start_column: "sd.start_date",
            end_column: "sd.end_date",
        },
    ],
    filters: &[
        FilterRule::Membership {
            field: "department",
            column: "d.name",
            null_passes: false,
        },
        FilterRule::Membership {
            field: "status",
            column: "lr.status::TEXT",
            null_passes: false,
        },
        FilterRule::Membership {
            field: "role",
            column: "r.name",
            null_passes: false,
        },
        FilterRule::Range {
            min_field: "min_duration",
            max_field: "max_duration",
            expr: duration_days!(),
            value: ValueType::Integer,
            section: Section::Where,
        },
    ],
};
