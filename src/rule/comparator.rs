//! Comparators per value category

use crate::error::{DateCriteriaError, Result};
use crate::rule::types::{ComparisonOp, ResolvedValue, ValueCategory};

/// Whether `op` is defined for values of `category`
pub fn supports(category: ValueCategory, op: ComparisonOp) -> bool {
    match category {
        ValueCategory::Date | ValueCategory::Integer => true,
        ValueCategory::DayOfWeek => matches!(op, ComparisonOp::Equal | ComparisonOp::NotEqual),
    }
}

/// Fail unless `op` is defined for `category`
pub fn check_supported(category: ValueCategory, op: ComparisonOp) -> Result<()> {
    if supports(category, op) {
        Ok(())
    } else {
        Err(DateCriteriaError::UnsupportedOperator {
            operator: op,
            category,
        })
    }
}

/// Compare two resolved values of the same category
pub fn compare(op: ComparisonOp, lhs: ResolvedValue, rhs: ResolvedValue) -> Result<bool> {
    match (lhs, rhs) {
        (ResolvedValue::Date(l), ResolvedValue::Date(r)) => Ok(ordered(op, l, r)),
        (ResolvedValue::Integer(l), ResolvedValue::Integer(r)) => Ok(ordered(op, l, r)),
        (ResolvedValue::DayOfWeek(l), ResolvedValue::DayOfWeek(r)) => match op {
            ComparisonOp::Equal => Ok(l == r),
            ComparisonOp::NotEqual => Ok(l != r),
            ComparisonOp::Less
            | ComparisonOp::LessEqual
            | ComparisonOp::Greater
            | ComparisonOp::GreaterEqual => Err(DateCriteriaError::UnsupportedOperator {
                operator: op,
                category: ValueCategory::DayOfWeek,
            }),
        },
        (l, r) => Err(DateCriteriaError::CategoryMismatch {
            lhs: format!("{:?}", l),
            lhs_category: l.category(),
            rhs: format!("{:?}", r),
            rhs_category: r.category(),
        }),
    }
}

#[inline]
fn ordered<T: Ord>(op: ComparisonOp, l: T, r: T) -> bool {
    match op {
        ComparisonOp::Equal => l == r,
        ComparisonOp::NotEqual => l != r,
        ComparisonOp::Less => l < r,
        ComparisonOp::LessEqual => l <= r,
        ComparisonOp::Greater => l > r,
        ComparisonOp::GreaterEqual => l >= r,
    }
}
