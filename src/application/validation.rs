//! Filter validation.
//!
//! Turns raw request filters into typed [`FilterCriterion`]s for one report.
//! Every failure happens here, before any statement text exists.

use tracing::debug;

use crate::application::dto::ReportFilters;
use crate::application::reports::{FilterRule, PeriodTarget, ReportDefinition, END_DATE, START_DATE};
use crate::domain::errors::FilterError;
use crate::domain::query::{CriterionKind, FilterCriterion, Section};
use crate::domain::value_objects::{BindValue, ValueType};

/// Most bind parameters one Postgres statement can carry
pub const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

/// Validate `filters` against `definition`.
///
/// Returns the reporting-period criteria first, then one criterion per
/// supplied optional filter in the definition's declared order. Filters the
/// report does not know are ignored.
pub fn validate_filters(
    definition: &ReportDefinition,
    filters: &ReportFilters,
) -> Result<Vec<FilterCriterion>, FilterError> {
    let (period_start, period_end) = validate_period(filters)?;

    let mut criteria = Vec::with_capacity(definition.period.len() + definition.filters.len());

    for target in definition.period {
        criteria.push(period_criterion(*target, &period_start, &period_end));
    }

    let mut placeholders: usize = criteria.iter().map(FilterCriterion::placeholder_count).sum();

    for rule in definition.filters {
        if let Some(criterion) = validate_rule(rule, filters)? {
            placeholders += criterion.placeholder_count();
            if placeholders > MAX_BIND_PARAMETERS {
                return Err(FilterError::invalid(criterion.field(), "too many values"));
            }
            criteria.push(criterion);
        }
    }

    let accepted = definition.accepted_filters();
    for name in filters
        .names()
        .filter(|name| !accepted.iter().any(|known| known == name))
    {
        debug!(report = %definition.kind, filter = name, "ignoring_unknown_filter");
    }

    Ok(criteria)
}

fn validate_period(filters: &ReportFilters) -> Result<(BindValue, BindValue), FilterError> {
    let start = required_value(filters, START_DATE)?;
    let end = required_value(filters, END_DATE)?;

    Ok((
        ValueType::Date.parse(START_DATE, start)?,
        ValueType::Date.parse(END_DATE, end)?,
    ))
}

fn required_value<'a>(filters: &'a ReportFilters, field: &str) -> Result<&'a str, FilterError> {
    filters
        .first(field)
        .ok_or_else(|| FilterError::MissingRequiredFilter(field.to_string()))
}

fn period_criterion(target: PeriodTarget, start: &BindValue, end: &BindValue) -> FilterCriterion {
    let kind = match target {
        PeriodTarget::Range { column } => CriterionKind::BoundedRange {
            expr: column,
            min: Some(start.clone()),
            max: Some(end.clone()),
            section: Section::Where,
        },
        PeriodTarget::Overlap {
            start_column,
            end_column,
        } => CriterionKind::DateOverlap {
            start_column,
            end_column,
            period_start: start.clone(),
            period_end: end.clone(),
        },
    };

    FilterCriterion::required(START_DATE, kind)
}

fn validate_rule(
    rule: &FilterRule,
    filters: &ReportFilters,
) -> Result<Option<FilterCriterion>, FilterError> {
    let criterion = match *rule {
        FilterRule::Equality {
            field,
            column,
            value,
        } => match filters.first(field) {
            Some(raw) => Some(FilterCriterion::optional(
                field,
                CriterionKind::Equality {
                    column,
                    value: value.parse(field, raw)?,
                },
            )),
            None => None,
        },
        FilterRule::Membership {
            field,
            column,
            null_passes,
        } => {
            let values: Vec<BindValue> = filters
                .all(field)
                .into_iter()
                .map(|v| BindValue::Text(v.to_string()))
                .collect();

            if values.is_empty() {
                None
            } else {
                Some(FilterCriterion::optional(
                    field,
                    CriterionKind::Membership {
                        column,
                        values,
                        null_passes,
                    },
                ))
            }
        }
        FilterRule::Range {
            min_field,
            max_field,
            expr,
            value,
            section,
        } => {
            let min = optional_typed(filters, min_field, value)?;
            let max = optional_typed(filters, max_field, value)?;

            if min.is_none() && max.is_none() {
                None
            } else {
                let field = if min.is_some() { min_field } else { max_field };
                Some(FilterCriterion::optional(
                    field,
                    CriterionKind::BoundedRange {
                        expr,
                        min,
                        max,
                        section,
                    },
                ))
            }
        }
        FilterRule::Presence { field, expr } => filters
            .first(field)
            .filter(|raw| raw.eq_ignore_ascii_case("true"))
            .map(|_| FilterCriterion::optional(field, CriterionKind::Presence { expr })),
    };

    Ok(criterion)
}

fn optional_typed(
    filters: &ReportFilters,
    field: &str,
    value: ValueType,
) -> Result<Option<BindValue>, FilterError> {
    filters
        .first(field)
        .map(|raw| value.parse(field, raw))
        .transpose()
}
