use tracing::debug;

use super::binder::{ParameterBinder, ParameterList};
use super::compiler::{ConditionCompiler, ConditionFragment};
use super::criterion::{FilterCriterion, Section};
use super::template::QueryTemplate;

/// Final statement text with its ordered parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: ParameterList,
}

impl BuiltQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParameterList {
        &self.params
    }
}

/// Combines a template with the criteria of one request
pub struct ClauseAssembler<'a> {
    template: &'a QueryTemplate,
}

impl<'a> ClauseAssembler<'a> {
    pub fn new(template: &'a QueryTemplate) -> Self {
        Self { template }
    }

    /// Compile and assemble the criteria into a statement.
    ///
    /// Required criteria are compiled first so they always hold the lowest
    /// placeholder indices; the remaining criteria follow with Where-section
    /// ones ahead of Having-section ones, each group in input order. Output
    /// depends only on the inputs.
    pub fn assemble(&self, criteria: &[FilterCriterion]) -> BuiltQuery {
        let mut ordered: Vec<&FilterCriterion> = criteria.iter().collect();
        ordered.sort_by_key(|c| compile_rank(c));

        let mut binder = ParameterBinder::new();
        let mut where_fragments = Vec::new();
        let mut having_fragments = Vec::new();

        for criterion in ordered {
            for fragment in ConditionCompiler::compile(criterion, &mut binder) {
                match fragment.section() {
                    Section::Where => where_fragments.push(fragment),
                    Section::Having => having_fragments.push(fragment),
                }
            }
        }

        let sql = self.render(&where_fragments, &having_fragments);
        let params = binder.finish();

        debug!(
            where_conditions = where_fragments.len(),
            having_conditions = having_fragments.len(),
            parameters = params.len(),
            "query_assembled"
        );

        BuiltQuery { sql, params }
    }

    fn render(&self, where_fragments: &[ConditionFragment], having: &[ConditionFragment]) -> String {
        let template = self.template;
        let mut sql = template.select.trim().to_string();

        let where_conditions: Vec<&str> = template
            .fixed_conditions
            .iter()
            .copied()
            .chain(where_fragments.iter().map(ConditionFragment::text))
            .collect();

        if !where_conditions.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&where_conditions.join("\n  AND "));
        }

        if !template.group_by.is_empty() {
            sql.push_str("\nGROUP BY ");
            sql.push_str(&template.group_by.join(", "));
        }

        if !having.is_empty() {
            let having_conditions: Vec<&str> = having.iter().map(ConditionFragment::text).collect();
            sql.push_str("\nHAVING ");
            sql.push_str(&having_conditions.join("\n  AND "));
        }

        if !template.order_by.is_empty() {
            sql.push_str("\nORDER BY ");
            sql.push_str(template.order_by);
        }

        sql
    }
}

fn compile_rank(criterion: &FilterCriterion) -> u8 {
    match (criterion.is_required(), criterion.section()) {
        (true, _) => 0,
        (false, Section::Where) => 1,
        (false, Section::Having) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::CriterionKind;
    use crate::domain::value_objects::BindValue;
    use chrono::NaiveDate;

    const HOURS: &str = "SUM(sl.hours)";

    const TEMPLATE: QueryTemplate = QueryTemplate {
        select: "\n    SELECT d.name, SUM(sl.hours) AS total\n    FROM shift_logs sl\n    JOIN departments d ON sl.department_id = d.id\n",
        fixed_conditions: &["sl.hours IS NOT NULL"],
        group_by: &["d.name"],
        order_by: "total DESC",
    };

    fn date(s: &str) -> BindValue {
        BindValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    fn window() -> FilterCriterion {
        FilterCriterion::required(
            "start_date",
            CriterionKind::BoundedRange {
                expr: "sl.date",
                min: Some(date("2024-01-01")),
                max: Some(date("2024-01-31")),
                section: Section::Where,
            },
        )
    }

    fn departments(values: &[&str]) -> FilterCriterion {
        FilterCriterion::optional(
            "department",
            CriterionKind::Membership {
                column: "d.name",
                values: values.iter().map(|v| BindValue::Text(v.to_string())).collect(),
                null_passes: false,
            },
        )
    }

    fn min_hours(value: f64) -> FilterCriterion {
        FilterCriterion::optional(
            "min_hours",
            CriterionKind::BoundedRange {
                expr: HOURS,
                min: Some(BindValue::Decimal(value)),
                max: None,
                section: Section::Having,
            },
        )
    }

    #[test]
    fn test_assemble_window_only() {
        let query = ClauseAssembler::new(&TEMPLATE).assemble(&[window()]);

        assert_eq!(
            query.sql(),
            "SELECT d.name, SUM(sl.hours) AS total\n    FROM shift_logs sl\n    JOIN departments d ON sl.department_id = d.id\nWHERE sl.hours IS NOT NULL\n  AND sl.date >= $1\n  AND sl.date <= $2\nGROUP BY d.name\nORDER BY total DESC"
        );
        assert_eq!(
            query.params().as_slice(),
            &[date("2024-01-01"), date("2024-01-31")]
        );
        assert!(!query.sql().contains("HAVING"));
    }

    #[test]
    fn test_assemble_places_required_criteria_first() {
        // Optional criteria listed before the window still number after it.
        let query =
            ClauseAssembler::new(&TEMPLATE).assemble(&[min_hours(10.0), departments(&["A", "B"]), window()]);

        assert!(query.sql().contains("sl.date >= $1"));
        assert!(query.sql().contains("sl.date <= $2"));
        assert!(query.sql().contains("d.name IN ($3, $4)"));
        assert!(query.sql().contains(&format!("HAVING {} >= $5", HOURS)));
        assert_eq!(query.params().len(), 5);
        assert_eq!(query.params().as_slice()[4], BindValue::Decimal(10.0));
    }

    #[test]
    fn test_having_follows_group_by_and_where_precedes_it() {
        let query = ClauseAssembler::new(&TEMPLATE).assemble(&[window(), min_hours(1.0)]);
        let sql = query.sql();

        let where_at = sql.find("\nWHERE ").unwrap();
        let group_at = sql.find("\nGROUP BY ").unwrap();
        let having_at = sql.find("\nHAVING ").unwrap();
        let order_at = sql.find("\nORDER BY ").unwrap();

        assert!(where_at < group_at);
        assert!(group_at < having_at);
        assert!(having_at < order_at);
    }

    #[test]
    fn test_empty_membership_equals_omission() {
        let assembler = ClauseAssembler::new(&TEMPLATE);
        let with_empty = assembler.assemble(&[window(), departments(&[])]);
        let without = assembler.assemble(&[window()]);

        assert_eq!(with_empty, without);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let criteria = [window(), departments(&["A"]), min_hours(3.5)];
        let assembler = ClauseAssembler::new(&TEMPLATE);

        assert_eq!(assembler.assemble(&criteria), assembler.assemble(&criteria));
    }

    #[test]
    fn test_assemble_without_where_or_group_by() {
        const BARE: QueryTemplate = QueryTemplate {
            select: "SELECT 1",
            fixed_conditions: &[],
            group_by: &[],
            order_by: "",
        };

        let query = ClauseAssembler::new(&BARE).assemble(&[]);

        assert_eq!(query.sql(), "SELECT 1");
        assert!(query.params().is_empty());
    }
}
