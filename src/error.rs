//! Error types for the date criteria engine

use crate::rule::{ComparisonOp, ValueCategory};
use thiserror::Error;

/// Main error type for the date criteria engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateCriteriaError {
    /// Clause or operand does not follow the rule grammar
    #[error("Invalid rule: {0}")]
    Grammar(String),

    #[error(
        "Incompatible operands in rule - \"{lhs}\" ({lhs_category}) is not comparable with \"{rhs}\" ({rhs_category})"
    )]
    CategoryMismatch {
        lhs: String,
        lhs_category: ValueCategory,
        rhs: String,
        rhs_category: ValueCategory,
    },

    #[error("Operator '{operator}' is not supported for {category} values")]
    UnsupportedOperator {
        operator: ComparisonOp,
        category: ValueCategory,
    },

    #[error("Invalid arithmetic: {0}")]
    ArithmeticType(String),

    /// Raised at query time, never at compile time
    #[error("Couldn't get easter for year {year}")]
    LookupRange { year: i32 },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DateCriteriaError {
    fn from(err: serde_json::Error) -> Self {
        DateCriteriaError::Config(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<DateCriteriaError> for pyo3::PyErr {
    fn from(err: DateCriteriaError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyLookupError, PyOverflowError, PyValueError};

        match err {
            DateCriteriaError::LookupRange { .. } => PyLookupError::new_err(err.to_string()),
            DateCriteriaError::Overflow(_) => PyOverflowError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the date criteria engine
pub type Result<T> = std::result::Result<T, DateCriteriaError>;
