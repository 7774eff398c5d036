use thiserror::Error;

/// Rejections raised while validating caller-supplied report filters.
///
/// Both variants are raised before any SQL is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Missing required filter: {0}")]
    MissingRequiredFilter(String),

    #[error("Invalid value for filter '{field}': {reason}")]
    InvalidFilterValue { field: String, reason: String },
}

impl FilterError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the filter that caused the rejection
    pub fn field(&self) -> &str {
        match self {
            FilterError::MissingRequiredFilter(field) => field,
            FilterError::InvalidFilterValue { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_filter_display() {
        let err = FilterError::MissingRequiredFilter("start_date".to_string());
        assert_eq!(err.to_string(), "Missing required filter: start_date");
        assert_eq!(err.field(), "start_date");
    }

    #[test]
    fn test_invalid_filter_value_display() {
        let err = FilterError::invalid("min_hours", "expected a number, got 'abc'");
        assert!(err.to_string().contains("min_hours"));
        assert!(err.to_string().contains("'abc'"));
        assert_eq!(err.field(), "min_hours");
    }
}
