use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::QueryTemplate;
use crate::domain::value_objects::ReportKind;

const SELECT: &str = r#"
SELECT
    EXTRACT(YEAR FROM sh.date)::INTEGER AS assignment_year,
    EXTRACT(MONTH FROM sh.date)::INTEGER AS assignment_month,
    TO_CHAR(sh.date, 'YYYY-MM') AS assignment_month_year,
    COUNT(sa.id) AS total_shifts
FROM shift_assignments sa
JOIN shifts sh ON sa.shift_id = sh.id
LEFT JOIN staff s ON sa.staff_id = s.id
LEFT JOIN roles r ON s.role_id = r.id
LEFT JOIN departments d ON sa.department_id = d.id
LEFT JOIN shift_times st ON sh.shift_time_id = st.id
"#;

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::MonthlyShifts,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &[],
        group_by: &[
            "EXTRACT(YEAR FROM sh.date)",
            "EXTRACT(MONTH FROM sh.date)",
            "TO_CHAR(sh.date, 'YYYY-MM')",
        ],
        order_by: "assignment_year, assignment_month",
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
        FilterRule::Membership {
            field: "shift_type",
            column: "sa.shift_type::TEXT",
            null_passes: false,
        },
        FilterRule::Membership {
            field: "shift_time",
            column: "st.name",
            null_passes: false,
        },
    ],
};
