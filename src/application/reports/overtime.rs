use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::{QueryTemplate, Section};
use crate::domain::value_objects::{ReportKind, ValueType};

macro_rules! overtime_hours {
    () => {
        "CAST(SUM(EXTRACT(EPOCH FROM o.duration)) / 3600 AS DOUBLE PRECISION)"
    };
}

const SELECT: &str = concat!(
    r#"
SELECT
    s.name AS staff_name,
    r.name AS role_name,
    d.name AS department_name,
    "#,
    overtime_hours!(),
    r#" AS total_overtime_hours
FROM overtimes o
JOIN shift_assignments sa ON o.shift_assignment_id = sa.id
JOIN staff s ON sa.staff_id = s.id
JOIN roles r ON s.role_id = r.id
JOIN departments d ON sa.department_id = d.id
JOIN shifts sh ON sa.shift_id = sh.id
"#
);

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::Overtime,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &[],
        group_by: &["s.name", "r.name", "d.name"],
        order_by: "total_overtime_hours DESC",
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
            min_field: "min_overtime_hours",
            max_field: "max_overtime_hours",
            expr: overtime_hours!(),
            value: ValueType::Decimal,
            section: Section::Having,
        },
    ],
};
