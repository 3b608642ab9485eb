//! Constraint compilation
//!
//! A constraint is one compiled `operand op operand` clause. Identity is the
//! canonical text (operands trimmed, whitespace around the operator removed),
//! compared case-insensitively.

use crate::error::{DateCriteriaError, Result};
use crate::rule::comparator::{check_supported, compare};
use crate::rule::operand::{resolve_operand, Operand};
use crate::rule::parser::split_comparison;
use crate::rule::types::{ComparisonOp, ValueCategory};
use chrono::NaiveDate;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Single compiled comparison, evaluable against a date
#[derive(Debug, Clone)]
pub struct Constraint {
    text: String,
    key: String,
    lhs: Operand,
    op: ComparisonOp,
    rhs: Operand,
}

impl Constraint {
    /// Compile one clause such as `Date == EndOfMonth - 3`
    pub fn compile(clause: &str) -> Result<Constraint> {
        let (lhs_text, op, rhs_text) = split_comparison(clause)?;
        let lhs = resolve_operand(lhs_text)?;
        let rhs = resolve_operand(rhs_text)?;

        let (lhs_category, rhs_category) = (lhs.category(), rhs.category());
        if lhs_category != rhs_category {
            return Err(DateCriteriaError::CategoryMismatch {
                lhs: lhs_text.to_string(),
                lhs_category,
                rhs: rhs_text.to_string(),
                rhs_category,
            });
        }
        check_supported(lhs_category, op)?;

        let text = format!("{}{}{}", lhs_text, op, rhs_text);
        Ok(Constraint {
            key: text.to_lowercase(),
            text,
            lhs,
            op,
            rhs,
        })
    }

    /// Canonical text, original casing preserved
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn operator(&self) -> ComparisonOp {
        self.op
    }

    /// Shared category of both operands
    pub fn category(&self) -> ValueCategory {
        self.lhs.category()
    }

    pub fn lhs(&self) -> &Operand {
        &self.lhs
    }

    pub fn rhs(&self) -> &Operand {
        &self.rhs
    }

    /// Evaluate against a date; fails only on out-of-range lookups or overflow
    #[inline]
    pub fn evaluate(&self, date: NaiveDate) -> Result<bool> {
        compare(self.op, self.lhs.resolve(date)?, self.rhs.resolve(date)?)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
