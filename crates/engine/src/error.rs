//! Error taxonomy for the learning-path engine.

use thiserror::Error;

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors raised by the engine's pure operations.
///
/// Every operation fails fast with one of these kinds instead of substituting
/// defaults. An empty optimizer result is not an error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PathError {
    /// A required numeric field is absent from a demand or catalog record.
    #[error("missing field '{field}' in record '{record}'")]
    MissingField {
        /// Identifier of the offending record (skill name or course id).
        record: String,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A course that cannot be scored or scheduled.
    #[error("invalid course '{id}': {reason}")]
    InvalidCourse {
        /// Course id.
        id: String,
        /// Why the course was rejected.
        reason: String,
    },

    /// A negative time budget.
    #[error("invalid budget: {0} weeks")]
    InvalidBudget(i64),

    /// The exact optimizer keys states by a fixed-width bitset.
    #[error("candidate pool of {count} courses exceeds the exact optimizer limit of {limit}")]
    CandidatePoolTooLarge {
        /// Number of selectable candidates.
        count: usize,
        /// Maximum supported by the exact strategy.
        limit: usize,
    },
}

impl PathError {
    pub(crate) fn missing(record: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            record: record.into(),
            field,
        }
    }

    pub(crate) fn invalid_course(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCourse {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_record() {
        let err = PathError::missing("Python", "growth_rate");
        assert_eq!(
            err.to_string(),
            "missing field 'growth_rate' in record 'Python'"
        );

        let err = PathError::invalid_course("PY101", "course has no required skills");
        assert_eq!(
            err.to_string(),
            "invalid course 'PY101': course has no required skills"
        );

        assert_eq!(
            PathError::InvalidBudget(-4).to_string(),
            "invalid budget: -4 weeks"
        );
    }
}
