use super::binder::{ParameterBinder, Placeholder};
use super::criterion::{CriterionKind, FilterCriterion, Section};

/// One compiled predicate and the placeholders it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionFragment {
    text: String,
    section: Section,
    placeholders: Vec<Placeholder>,
}

impl ConditionFragment {
    fn new(text: String, section: Section, placeholders: Vec<Placeholder>) -> Self {
        Self {
            text,
            section,
            placeholders,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }
}

/// Turns validated criteria into condition fragments
pub struct ConditionCompiler;

impl ConditionCompiler {
    /// Compile one criterion, allocating a placeholder for every value in
    /// the order it appears in the fragment text.
    ///
    /// Returns no fragment for an empty membership list and up to two for a
    /// bounded range.
    pub fn compile(
        criterion: &FilterCriterion,
        binder: &mut ParameterBinder,
    ) -> Vec<ConditionFragment> {
        let section = criterion.section();

        match criterion.kind() {
            CriterionKind::Equality { column, value } => {
                let p = binder.allocate(value.clone());
                vec![ConditionFragment::new(
                    format!("{} = {}", column, p),
                    section,
                    vec![p],
                )]
            }
            CriterionKind::Membership {
                column,
                values,
                null_passes,
            } => {
                if values.is_empty() {
                    return Vec::new();
                }

                let tokens = binder.allocate_all(values.iter().cloned());
                let list = tokens
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");

                let text = if *null_passes {
                    format!("({col} IS NULL OR {col} IN ({list}))", col = column)
                } else {
                    format!("{} IN ({})", column, list)
                };

                vec![ConditionFragment::new(text, section, tokens)]
            }
            CriterionKind::BoundedRange { expr, min, max, .. } => {
                let mut fragments = Vec::with_capacity(2);

                if let Some(min) = min {
                    let p = binder.allocate(min.clone());
                    fragments.push(ConditionFragment::new(
                        format!("{} >= {}", expr, p),
                        section,
                        vec![p],
                    ));
                }

                if let Some(max) = max {
                    let p = binder.allocate(max.clone());
                    fragments.push(ConditionFragment::new(
                        format!("{} <= {}", expr, p),
                        section,
                        vec![p],
                    ));
                }

                fragments
            }
            CriterionKind::DateOverlap {
                start_column,
                end_column,
                period_start,
                period_end,
            } => {
                // Period end is referenced first in the text, so it is bound first.
                let end = binder.allocate(period_end.clone());
                let start = binder.allocate(period_start.clone());

                vec![ConditionFragment::new(
                    format!(
                        "({s} IS NULL OR {s} <= {end}) AND ({e} IS NULL OR {e} >= {start})",
                        s = start_column,
                        e = end_column,
                        end = end,
                        start = start,
                    ),
                    section,
                    vec![end, start],
                )]
            }
            CriterionKind::Presence { expr } => {
                vec![ConditionFragment::new(
                    format!("{} > 0", expr),
                    section,
                    Vec::new(),
                )]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BindValue;
    use chrono::NaiveDate;

    fn text(s: &str) -> BindValue {
        BindValue::Text(s.to_string())
    }

    fn date(s: &str) -> BindValue {
        BindValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
    }

    #[test]
    fn test_compile_equality() {
        let mut binder = ParameterBinder::new();
        let criterion = FilterCriterion::optional(
            "staff_id",
            CriterionKind::Equality {
                column: "s.id",
                value: BindValue::Integer(42),
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text(), "s.id = $1");
        assert_eq!(fragments[0].section(), Section::Where);
        assert_eq!(binder.finish().as_slice(), &[BindValue::Integer(42)]);
    }

    #[test]
    fn test_compile_membership_continues_numbering() {
        let mut binder = ParameterBinder::new();
        binder.allocate(date("2024-01-01"));
        binder.allocate(date("2024-01-31"));

        let criterion = FilterCriterion::optional(
            "department",
            CriterionKind::Membership {
                column: "d.name",
                values: vec![text("A"), text("B")],
                null_passes: false,
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text(), "d.name IN ($3, $4)");
        assert_eq!(
            fragments[0]
                .placeholders()
                .iter()
                .map(|p| p.index())
                .collect::<Vec<_>>(),
            vec![3, 4]
        );

        let params = binder.finish();
        assert_eq!(params.len(), 4);
        assert_eq!(params.as_slice()[2..], [text("A"), text("B")]);
    }

    #[test]
    fn test_compile_empty_membership_is_no_constraint() {
        let mut binder = ParameterBinder::new();
        let criterion = FilterCriterion::optional(
            "role",
            CriterionKind::Membership {
                column: "r.name",
                values: Vec::new(),
                null_passes: false,
            },
        );

        assert!(ConditionCompiler::compile(&criterion, &mut binder).is_empty());
        assert_eq!(binder.allocated(), 0);
    }

    #[test]
    fn test_compile_null_tolerant_membership() {
        let mut binder = ParameterBinder::new();
        let criterion = FilterCriterion::optional(
            "assigned_shift_time",
            CriterionKind::Membership {
                column: "st_assigned.name",
                values: vec![text("Night")],
                null_passes: true,
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert_eq!(
            fragments[0].text(),
            "(st_assigned.name IS NULL OR st_assigned.name IN ($1))"
        );
    }

    #[test]
    fn test_compile_bounded_range_emits_each_side_independently() {
        let expr = "SUM(EXTRACT(EPOCH FROM o.duration)) / 3600";

        let mut binder = ParameterBinder::new();
        let both = FilterCriterion::optional(
            "min_overtime_hours",
            CriterionKind::BoundedRange {
                expr,
                min: Some(BindValue::Decimal(2.0)),
                max: Some(BindValue::Decimal(8.0)),
                section: Section::Having,
            },
        );
        let fragments = ConditionCompiler::compile(&both, &mut binder);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text(), format!("{} >= $1", expr));
        assert_eq!(fragments[1].text(), format!("{} <= $2", expr));
        assert!(fragments.iter().all(|f| f.section() == Section::Having));

        let mut binder = ParameterBinder::new();
        let max_only = FilterCriterion::optional(
            "max_overtime_hours",
            CriterionKind::BoundedRange {
                expr,
                min: None,
                max: Some(BindValue::Decimal(8.0)),
                section: Section::Having,
            },
        );
        let fragments = ConditionCompiler::compile(&max_only, &mut binder);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text(), format!("{} <= $1", expr));
    }

    #[test]
    fn test_compile_date_overlap_binds_period_end_first() {
        let mut binder = ParameterBinder::new();
        let criterion = FilterCriterion::required(
            "start_date",
            CriterionKind::DateOverlap {
                start_column: "sd.start_date",
                end_column: "sd.end_date",
                period_start: date("2024-01-01"),
                period_end: date("2024-01-31"),
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert_eq!(
            fragments[0].text(),
            "(sd.start_date IS NULL OR sd.start_date <= $1) AND (sd.end_date IS NULL OR sd.end_date >= $2)"
        );
        assert_eq!(
            binder.finish().as_slice(),
            &[date("2024-01-31"), date("2024-01-01")]
        );
    }

    #[test]
    fn test_compile_presence_has_no_placeholder() {
        let mut binder = ParameterBinder::new();
        let criterion = FilterCriterion::optional(
            "has_assignments",
            CriterionKind::Presence {
                expr: "COUNT(sa.id)",
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert_eq!(fragments[0].text(), "COUNT(sa.id) > 0");
        assert_eq!(fragments[0].section(), Section::Having);
        assert!(fragments[0].placeholders().is_empty());
        assert_eq!(binder.allocated(), 0);
    }

    #[test]
    fn test_values_never_reach_statement_text() {
        let mut binder = ParameterBinder::new();
        let hostile = "x'); DROP TABLE staff; --";
        let criterion = FilterCriterion::optional(
            "department",
            CriterionKind::Membership {
                column: "d.name",
                values: vec![text(hostile)],
                null_passes: false,
            },
        );

        let fragments = ConditionCompiler::compile(&criterion, &mut binder);

        assert!(!fragments[0].text().contains("DROP"));
        assert_eq!(binder.finish().as_slice(), &[text(hostile)]);
    }
}
