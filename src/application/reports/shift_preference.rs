use super::{FilterRule, PeriodTarget, ReportDefinition};
use crate::domain::query::QueryTemplate;
use crate::domain::value_objects::{ReportKind, ValueType};

// Counts are DISTINCT since every preference row multiplies the assignments.
macro_rules! total_assignments {
    () => {
        "COUNT(DISTINCT sa.id)"
    };
}

macro_rules! preferred_assignments {
    () => {
        "COUNT(DISTINCT CASE WHEN ssp.shift_time_id = sh.shift_time_id THEN sa.id END)"
    };
}

const SELECT: &str = concat!(
    r#"
SELECT
    s.id::BIGINT AS staff_id,
    s.name AS staff_name,
    r.name AS role_name,
    STRING_AGG(DISTINCT d.name, ', ') AS departments,
    STRING_AGG(DISTINCT st_pref.name, ', ') AS preferred_shift_times,
    "#,
    total_assignments!(),
    r#" AS total_assignments_count,
    "#,
    preferred_assignments!(),
    r#" AS preferred_shift_assignments_count,
    CAST(CASE WHEN "#,
    total_assignments!(),
    " = 0 THEN 0 ELSE ",
    preferred_assignments!(),
    "::DECIMAL / ",
    total_assignments!(),
    r#" END AS DOUBLE PRECISION) AS preference_fulfillment_rate
FROM staff s
JOIN roles r ON s.role_id = r.id
LEFT JOIN staff_departments sd ON s.id = sd.staff_id
LEFT JOIN departments d ON sd.department_id = d.id
LEFT JOIN shift_assignments sa ON s.id = sa.staff_id
LEFT JOIN shifts sh ON sa.shift_id = sh.id
LEFT JOIN shift_times st_assigned ON sh.shift_time_id = st_assigned.id
LEFT JOIN staff_shift_preferences ssp ON s.id = ssp.staff_id
LEFT JOIN shift_times st_pref ON ssp.shift_time_id = st_pref.id
"#
);

pub(super) const DEFINITION: ReportDefinition = ReportDefinition {
    kind: ReportKind::ShiftPreference,
    template: QueryTemplate {
        select: SELECT,
        fixed_conditions: &[],
        group_by: &["s.id", "s.name", "r.name"],
        order_by: "s.name",
    },
    period: &[
        PeriodTarget::Overlap {
            start_column: "sh.date",
            end_column: "sh.date",
        },
        PeriodTarget::Overlap {
            start_column: "sd.start_date",
            end_column: "sd.end_date",
        },
    ],
    filters: &[
        FilterRule::Equality {
            field: "staff_id",
            column: "s.id",
            value: ValueType::Integer,
        },
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
            field: "preferred_shift_time",
            column: "st_pref.name",
            null_passes: false,
        },
        // Staff without assignments have no assigned shift time
        FilterRule::Membership {
            field: "assigned_shift_time",
            column: "st_assigned.name",
            null_passes: true,
        },
        FilterRule::Presence {
            field: "has_assignments",
            expr: total_assignments!(),
        },
    ],
};
