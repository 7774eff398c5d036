use crate::domain::value_objects::BindValue;

/// Evaluation phase a predicate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Row-level, evaluated before grouping
    Where,
    /// Aggregate-level, evaluated after grouping
    Having,
}

/// The shape of a validated filter.
///
/// Column names and expressions are `&'static str` so they can only come
/// from report definitions compiled into the binary, never from a request.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionKind {
    /// `column = $n`
    Equality {
        column: &'static str,
        value: BindValue,
    },
    /// `column IN ($n, ...)`; an empty list is no constraint.
    /// With `null_passes`, rows where the column is NULL are kept.
    Membership {
        column: &'static str,
        values: Vec<BindValue>,
        null_passes: bool,
    },
    /// `expr >= $n` and/or `expr <= $m`. Having-section ranges must name the
    /// full aggregate expression since select aliases are not visible there.
    BoundedRange {
        expr: &'static str,
        min: Option<BindValue>,
        max: Option<BindValue>,
        section: Section,
    },
    /// Null-safe overlap between an entity's validity window and the
    /// requested period. Either end of the entity window may be NULL
    /// (open-ended). A single nullable column may serve as both ends.
    DateOverlap {
        start_column: &'static str,
        end_column: &'static str,
        period_start: BindValue,
        period_end: BindValue,
    },
    /// `expr > 0` after grouping; carries no bound value
    Presence { expr: &'static str },
}

/// A validated, immutable filter ready for compilation
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriterion {
    field: &'static str,
    kind: CriterionKind,
    required: bool,
}

impl FilterCriterion {
    /// A criterion every request must carry (compiled first)
    pub fn required(field: &'static str, kind: CriterionKind) -> Self {
        Self {
            field,
            kind,
            required: true,
        }
    }

    pub fn optional(field: &'static str, kind: CriterionKind) -> Self {
        Self {
            field,
            kind,
            required: false,
        }
    }

    /// Request parameter name this criterion was built from
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn section(&self) -> Section {
        match &self.kind {
            CriterionKind::BoundedRange { section, .. } => *section,
            CriterionKind::Presence { .. } => Section::Having,
            CriterionKind::Equality { .. }
            | CriterionKind::Membership { .. }
            | CriterionKind::DateOverlap { .. } => Section::Where,
        }
    }

    /// Number of placeholders this criterion allocates when compiled
    pub fn placeholder_count(&self) -> usize {
        match &self.kind {
            CriterionKind::Equality { .. } => 1,
            CriterionKind::Membership { values, .. } => values.len(),
            CriterionKind::BoundedRange { min, max, .. } => {
                usize::from(min.is_some()) + usize::from(max.is_some())
            }
            CriterionKind::DateOverlap { .. } => 2,
            CriterionKind::Presence { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_by_kind() {
        let equality = FilterCriterion::optional(
            "staff_id",
            CriterionKind::Equality {
                column: "s.id",
                value: BindValue::Integer(7),
            },
        );
        let presence = FilterCriterion::optional(
            "has_assignments",
            CriterionKind::Presence {
                expr: "COUNT(sa.id)",
            },
        );
        let having_range = FilterCriterion::optional(
            "min_hours",
            CriterionKind::BoundedRange {
                expr: "SUM(x)",
                min: Some(BindValue::Decimal(1.0)),
                max: None,
                section: Section::Having,
            },
        );

        assert_eq!(equality.section(), Section::Where);
        assert_eq!(presence.section(), Section::Having);
        assert_eq!(having_range.section(), Section::Having);
    }

    #[test]
    fn test_required_flag() {
        let kind = CriterionKind::Presence { expr: "COUNT(x)" };
        assert!(FilterCriterion::required("a", kind.clone()).is_required());
        assert!(!FilterCriterion::optional("a", kind).is_required());
    }

    #[test]
    fn test_placeholder_count_by_kind() {
        let membership = FilterCriterion::optional(
            "department",
            CriterionKind::Membership {
                column: "d.name",
                values: vec![BindValue::Text("ER".into()), BindValue::Text("ICU".into())],
                null_passes: false,
            },
        );
        let half_open = FilterCriterion::optional(
            "min_hours",
            CriterionKind::BoundedRange {
                expr: "SUM(x)",
                min: None,
                max: Some(BindValue::Decimal(8.0)),
                section: Section::Having,
            },
        );
        let presence = FilterCriterion::optional("has_assignments", CriterionKind::Presence {
            expr: "COUNT(x)",
        });

        assert_eq!(membership.placeholder_count(), 2);
        assert_eq!(half_open.placeholder_count(), 1);
        assert_eq!(presence.placeholder_count(), 0);
    }
}
