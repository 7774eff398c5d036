use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::{QueryTemplate, Section};
use crate::domain::value_objects::{ReportKind, ValueType};

// A check-out earlier than the check-in crossed midnight.
macro_rules! hours_worked {
    () => {
        "CAST(SUM(EXTRACT(EPOCH FROM CASE WHEN sl.check_out >= sl.check_in \
         THEN sl.check_out - sl.check_in \
         ELSE (sl.check_out + INTERVAL '1 day') - sl.check_in END)) / 3600 AS DOUBLE PRECISION)"
    };
}

const SELECT: &str = concat!(
    r#"
SELECT
    s.name AS staff_name,
    r.name AS role_name,
    d.name AS department_name,
    "#,
    hours_worked!(),
    r#" AS total_hours_worked
FROM shift_logs sl
JOIN shift_assignments sa ON sl.assignment_id = sa.id
JOIN staff s ON sa.staff_id = s.id
JOIN roles r ON s.role_id = r.id
JOIN departments d ON sa.department_id = d.id
JOIN shifts sh ON sa.shift_id = sh.id
"#
);

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::WorkHours,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &["sl.check_in IS NOT NULL", "sl.check_out IS NOT NULL"],
        group_by: &["s.name", "r.name", "d.name"],
        order_by: "total_hours_worked DESC",
    },
    period: &[PeriodTarget::Range { column: "sh.date" }],
    filters: &[
        FilterRule::Membership {
            field: "role",
            column: "r.name",
            null_passes: false,
        },
        FilterRule::Membership {
            field: "department",
            column: "d.name",
            null_passes: false,
        },
        FilterRule::Range {
            min_field: "min_hours",
            max_field: "max_hours",
            expr: hours_worked!(),
            value: ValueType::Decimal,
            section: Section::Having,
        },
    ],
};
