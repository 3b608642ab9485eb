//! Operand resolution
//!
//! Turns one side of a comparison into a typed [`Operand`], which produces a
//! [`ResolvedValue`] for any queried date.

use crate::calendar::{day_number, easter_sunday, end_of_month};
use crate::error::{DateCriteriaError, Result};
use crate::rule::parser::{
    is_date_shaped, parse_date_literal, parse_int_literal, split_arithmetic, Expression,
};
use crate::rule::types::{parse_weekday, ArithmeticOp, ResolvedValue, Token, ValueCategory};
use chrono::{Datelike, Duration, NaiveDate};

/// Compiled operand: a date-parameterised value producer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Literal date, integer or day of week (date literal arithmetic is folded here)
    Constant(ResolvedValue),
    /// Bare token such as `Month` or `Easter`
    Token(Token),
    /// `token op amount`
    Arithmetic {
        token: Token,
        op: ArithmeticOp,
        amount: i32,
    },
}

impl Operand {
    /// Category of every value this operand produces
    pub fn category(&self) -> ValueCategory {
        match self {
            Operand::Constant(value) => value.category(),
            Operand::Token(token) | Operand::Arithmetic { token, .. } => token.category(),
        }
    }

    /// Evaluate against a concrete date
    pub fn resolve(&self, date: NaiveDate) -> Result<ResolvedValue> {
        match *self {
            Operand::Constant(value) => Ok(value),
            Operand::Token(token) => token_value(token, date),
            Operand::Arithmetic { token, op, amount } => {
                apply_arithmetic(token_value(token, date)?, op, amount)
            }
        }
    }
}

/// Resolve operand text into an [`Operand`]
///
/// Order: date literal, integer literal, then a single term (token or day
/// name) or `lhs op integer`.
pub fn resolve_operand(text: &str) -> Result<Operand> {
    let text = text.trim();

    if let Some(date) = parse_date_literal(text) {
        return Ok(Operand::Constant(ResolvedValue::Date(date)));
    }
    if let Some(value) = parse_int_literal(text) {
        return Ok(Operand::Constant(ResolvedValue::Integer(i64::from(value))));
    }

    match split_arithmetic(text)? {
        Expression::Single(term) => resolve_term(term),
        Expression::Binary(lhs, op, rhs) => resolve_binary(lhs, op, rhs),
    }
}

fn resolve_term(term: &str) -> Result<Operand> {
    if let Some(token) = Token::parse(term) {
        return Ok(Operand::Token(token));
    }
    if let Some(day) = parse_weekday(term) {
        return Ok(Operand::Constant(ResolvedValue::DayOfWeek(day)));
    }
    if is_date_shaped(term) {
        return Err(DateCriteriaError::Grammar(format!(
            "Invalid date literal '{}'",
            term
        )));
    }

    Err(DateCriteriaError::Grammar(format!(
        "Unrecognised operand '{}'",
        term
    )))
}

fn resolve_binary(lhs: &str, op: ArithmeticOp, rhs: &str) -> Result<Operand> {
    let lhs_token = Token::parse(lhs);
    if parse_weekday(lhs).is_some()
        || parse_weekday(rhs).is_some()
        || lhs_token == Some(Token::DayOfWeek)
    {
        return Err(DateCriteriaError::ArithmeticType(format!(
            "cannot do arithmetic on a day of week in '{} {} {}'",
            lhs, op, rhs
        )));
    }

    let amount = parse_int_literal(rhs).ok_or_else(|| {
        DateCriteriaError::ArithmeticType(format!(
            "RHS of arithmetic operation ({}) must be a numeric value when LHS is \"{}\"",
            rhs, lhs
        ))
    })?;

    if let Some(date) = parse_date_literal(lhs) {
        require_offset(lhs, op)?;
        return shift_days(date, op, amount).map(|d| Operand::Constant(ResolvedValue::Date(d)));
    }

    let Some(token) = lhs_token else {
        return Err(DateCriteriaError::Grammar(format!(
            "Unrecognised operand '{}' in arithmetic expression",
            lhs
        )));
    };

    match (token.category(), op) {
        (ValueCategory::Date, _) => require_offset(lhs, op)?,
        (ValueCategory::Integer, ArithmeticOp::Divide | ArithmeticOp::Remainder) if amount == 0 => {
            return Err(DateCriteriaError::ArithmeticType(format!(
                "division by zero in '{} {} {}'",
                lhs, op, rhs
            )));
        }
        _ => {}
    }

    Ok(Operand::Arithmetic { token, op, amount })
}

/// Dates only move by whole days
fn require_offset(lhs: &str, op: ArithmeticOp) -> Result<()> {
    if op.is_offset() {
        Ok(())
    } else {
        Err(DateCriteriaError::ArithmeticType(format!(
            "operator '{}' cannot be applied to date \"{}\"; only + and - are supported",
            op, lhs
        )))
    }
}

fn token_value(token: Token, date: NaiveDate) -> Result<ResolvedValue> {
    let value = match token {
        Token::Date => ResolvedValue::Date(date),
        Token::Day => ResolvedValue::Integer(i64::from(date.day())),
        Token::Month => ResolvedValue::Integer(i64::from(date.month())),
        Token::Year => ResolvedValue::Integer(i64::from(date.year())),
        Token::DayOfWeek => ResolvedValue::DayOfWeek(date.weekday()),
        Token::DayNumber => ResolvedValue::Integer(day_number(date)),
        Token::DayOfYear => ResolvedValue::Integer(i64::from(date.ordinal())),
        Token::Easter => ResolvedValue::Date(easter_sunday(date.year())?),
        Token::EndOfMonth => ResolvedValue::Date(end_of_month(date)?),
    };
    Ok(value)
}

fn apply_arithmetic(base: ResolvedValue, op: ArithmeticOp, amount: i32) -> Result<ResolvedValue> {
    match base {
        ResolvedValue::Date(date) => shift_days(date, op, amount).map(ResolvedValue::Date),
        ResolvedValue::Integer(value) => integer_op(value, op, amount).map(ResolvedValue::Integer),
        ResolvedValue::DayOfWeek(_) => Err(DateCriteriaError::ArithmeticType(
            "cannot do arithmetic on a day of week".to_string(),
        )),
    }
}

fn shift_days(date: NaiveDate, op: ArithmeticOp, amount: i32) -> Result<NaiveDate> {
    let days = match op {
        ArithmeticOp::Add => i64::from(amount),
        ArithmeticOp::Subtract => -i64::from(amount),
        other => {
            return Err(DateCriteriaError::ArithmeticType(format!(
                "operator '{}' cannot be applied to a date",
                other
            )))
        }
    };

    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| DateCriteriaError::Overflow(format!("{} {} {} days", date, op, amount)))
}

fn integer_op(value: i64, op: ArithmeticOp, amount: i32) -> Result<i64> {
    let rhs = i64::from(amount);
    let result = match op {
        ArithmeticOp::Add => value.checked_add(rhs),
        ArithmeticOp::Subtract => value.checked_sub(rhs),
        ArithmeticOp::Multiply => value.checked_mul(rhs),
        ArithmeticOp::Divide => value.checked_div(rhs),
        ArithmeticOp::Remainder => value.checked_rem(rhs),
        ArithmeticOp::Power => u32::try_from(amount)
            .ok()
            .and_then(|exp| value.checked_pow(exp)),
    };

    result.ok_or_else(|| DateCriteriaError::Overflow(format!("{} {} {}", value, op, amount)))
}
