use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::{QueryTemplate, Section};
use crate::domain::value_objects::{ReportKind, ValueType};

macro_rules! total_shifts {
    () => {
        "COUNT(sa.id)"
    };
}

macro_rules! on_call_shifts {
    () => {
        "COUNT(CASE WHEN sa.shift_type::TEXT = 'on-call' THEN sa.id END)"
    };
}

const SELECT: &str = concat!(
    r#"
SELECT
    s.id::BIGINT AS staff_id,
    s.name AS staff_name,
    r.name AS role_name,
    STRING_AGG(DISTINCT d.name, ', ') AS departments,
    "#,
    total_shifts!(),
    r#" AS total_shifts_assigned,
    "#,
    on_call_shifts!(),
    r#" AS on_call_shifts_assigned,
    CAST(CASE WHEN "#,
    total_shifts!(),
    " = 0 THEN 0 ELSE ",
    on_call_shifts!(),
    "::DECIMAL / ",
    total_shifts!(),
    r#" * 100 END AS DOUBLE PRECISION) AS on_call_percentage
FROM staff s
JOIN roles r ON s.role_id = r.id
LEFT JOIN shift_assignments sa ON s.id = sa.staff_id
LEFT JOIN departments d ON sa.department_id = d.id
LEFT JOIN shifts sh ON sa.shift_id = sh.id
"#
);

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::OnCallAnalysis,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &[],
        group_by: &["s.id", "s.name", "r.name"],
        order_by: "on_call_percentage DESC",
    },
    // Staff without shifts have a NULL date and stay in the report
    period: &[PeriodTarget::Overlap {
        start_column: "sh.date",
        end_column: "sh.date",
    }],
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
            min_field: "min_total_shifts",
            max_field: "max_total_shifts",
            expr: total_shifts!(),
            value: ValueType::Integer,
            section: Section::Having,
        },
        FilterRule::Range {
            min_field: "min_on_call_shifts",
            max_field: "max_on_call_shifts",
            expr: on_call_shifts!(),
            value: ValueType::Integer,
            section: Section::Having,
        },
        FilterRule::Presence {
            field: "has_assignments",
            expr: total_shifts!(),
        },
    ],
};
