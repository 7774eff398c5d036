use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::errors::FilterError;

/// A single value bound to a positional placeholder.
///
/// Values only ever travel to the database through the parameter list;
/// they are never rendered into statement text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BindValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
}

impl std::fmt::Display for BindValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindValue::Text(v) => write!(f, "{}", v),
            BindValue::Integer(v) => write!(f, "{}", v),
            BindValue::Decimal(v) => write!(f, "{}", v),
            BindValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

/// Expected type of a raw filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Matched verbatim against stored text, no normalization
    Text,
    Integer,
    Decimal,
    /// ISO calendar date (`YYYY-MM-DD`)
    Date,
}

impl ValueType {
    /// Parse a raw query-string value into a typed bind value
    pub fn parse(self, field: &str, raw: &str) -> Result<BindValue, FilterError> {
        match self {
            ValueType::Text => Ok(BindValue::Text(raw.to_string())),
            ValueType::Integer => raw.parse::<i64>().map(BindValue::Integer).map_err(|_| {
                FilterError::invalid(field, format!("expected an integer, got '{}'", raw))
            }),
            ValueType::Decimal => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(BindValue::Decimal(v)),
                _ => Err(FilterError::invalid(
                    field,
                    format!("expected a number, got '{}'", raw),
                )),
            },
            ValueType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(BindValue::Date)
                .map_err(|_| {
                    FilterError::invalid(field, format!("expected a YYYY-MM-DD date, got '{}'", raw))
                }),
        }
    }
}
