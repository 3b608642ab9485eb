//! Rule text splitting
//!
//! Breaks rule text into clauses, clauses into `lhs op rhs`, and operands
//! into at most one arithmetic operation.

use crate::error::{DateCriteriaError, Result};
use crate::rule::types::{ArithmeticOp, ComparisonOp};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Exact `YYYY-MM-DD` literal
static DATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date literal pattern"));

/// `YYYY-MM-DD` at the start of an operand, kept atomic during the arithmetic split
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern"));

const COMPARISON_CHARS: &[char] = &['!', '<', '>', '='];
const ARITHMETIC_CHARS: &[char] = &['+', '-', '*', '/', '%'];

/// Operand split on its (optional) arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression<'a> {
    Single(&'a str),
    Binary(&'a str, ArithmeticOp, &'a str),
}

/// Split rule text on `;`, dropping empty clauses
pub fn split_clauses(input: &str) -> impl Iterator<Item = &str> {
    input.split(';').map(str::trim).filter(|c| !c.is_empty())
}

/// Split a clause into trimmed `(lhs, operator, rhs)`
///
/// Runs of comparison characters are read whole, so `<=` is never seen as
/// `<` followed by `=`. Exactly one run must be present and it must be a
/// known operator.
pub fn split_comparison(clause: &str) -> Result<(&str, ComparisonOp, &str)> {
    let invalid = || DateCriteriaError::Grammar(format!("Invalid rule definition in '{}'", clause));

    let runs = char_runs(clause, COMPARISON_CHARS);
    let [(start, end)] = runs.as_slice() else {
        return Err(invalid());
    };

    let op = ComparisonOp::parse(&clause[*start..*end]).ok_or_else(invalid)?;
    Ok((clause[..*start].trim(), op, clause[*end..].trim()))
}

/// Split an operand into a single term or `lhs op rhs`
pub fn split_arithmetic(operand: &str) -> Result<Expression<'_>> {
    let operand = operand.trim();
    let invalid =
        || DateCriteriaError::Grammar(format!("Invalid expression in comparison: '{}'", operand));

    // A leading date literal contains '-' separators that are not operators
    let (head, rest) = match DATE_PREFIX.find(operand) {
        Some(m) => (Some(&operand[..m.end()]), &operand[m.end()..]),
        None => (None, operand),
    };

    let runs = char_runs(rest, ARITHMETIC_CHARS);
    let mut terms = Vec::with_capacity(runs.len() + 1);
    let mut ops = Vec::with_capacity(runs.len());
    let mut cursor = 0;
    for &(start, end) in &runs {
        terms.push(rest[cursor..start].trim());
        ops.push(ArithmeticOp::parse(&rest[start..end]).ok_or_else(invalid)?);
        cursor = end;
    }
    terms.push(rest[cursor..].trim());

    if let Some(date) = head {
        if !terms[0].is_empty() {
            return Err(invalid());
        }
        terms[0] = date;
    }

    match (terms.as_slice(), ops.as_slice()) {
        ([single], []) => Ok(Expression::Single(*single)),
        ([lhs, rhs], [op]) => Ok(Expression::Binary(*lhs, *op, *rhs)),
        _ => Err(invalid()),
    }
}

/// Whether the text has the shape of a date literal (valid or not)
#[inline]
pub fn is_date_shaped(text: &str) -> bool {
    DATE_LITERAL.is_match(text)
}

/// Parse an exact `YYYY-MM-DD` literal
pub fn parse_date_literal(text: &str) -> Option<NaiveDate> {
    if !is_date_shaped(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse an (optionally signed) integer literal
#[inline]
pub fn parse_int_literal(text: &str) -> Option<i32> {
    text.parse::<i32>().ok()
}

/// Byte ranges of maximal runs of `chars` in `text`
fn char_runs(text: &str, chars: &[char]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (chars.contains(&c), current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                runs.push((start, i));
                current = None;
            }
            _ => {}
        }
    }
    if let Some(start) = current {
        runs.push((start, text.len()));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clauses_skips_empty_entries() {
        let clauses: Vec<_> = split_clauses(" date == easter ;; day > 3 ; ").collect();
        assert_eq!(clauses, vec!["date == easter", "day > 3"]);
    }

    #[test]
    fn test_split_all_comparison_operators() {
        let cases = [
            ("day==4", ComparisonOp::Equal),
            ("day != 4", ComparisonOp::NotEqual),
            ("day<4", ComparisonOp::Less),
            ("day <= 4", ComparisonOp::LessEqual),
            ("day>4", ComparisonOp::Greater),
            ("day >=4", ComparisonOp::GreaterEqual),
        ];

        for (clause, expected) in cases {
            let (lhs, op, rhs) = split_comparison(clause).unwrap();
            assert_eq!((lhs, op, rhs), ("day", expected, "4"), "Failed for: {}", clause);
        }
    }

    #[test]
    fn test_split_comparison_rejects_bad_clauses() {
        for clause in ["date", "date = 4", "date <== 4", "day < 4 < 5", "day == 4 == 4"] {
            let err = split_comparison(clause).unwrap_err();
            match err {
                DateCriteriaError::Grammar(msg) => assert!(msg.contains(clause), "{}", msg),
                other => panic!("Expected grammar error for {}, got {:?}", clause, other),
            }
        }
    }

    #[test]
    fn test_split_arithmetic_single() {
        assert_eq!(split_arithmetic(" Easter ").unwrap(), Expression::Single("Easter"));
        assert_eq!(
            split_arithmetic("2022-12-19").unwrap(),
            Expression::Single("2022-12-19")
        );
    }

    #[test]
    fn test_split_arithmetic_binary() {
        assert_eq!(
            split_arithmetic("EndOfMonth - 3").unwrap(),
            Expression::Binary("EndOfMonth", ArithmeticOp::Subtract, "3")
        );
        assert_eq!(
            split_arithmetic("day**2").unwrap(),
            Expression::Binary("day", ArithmeticOp::Power, "2")
        );
        assert_eq!(
            split_arithmetic("2022-12-19 + 6").unwrap(),
            Expression::Binary("2022-12-19", ArithmeticOp::Add, "6")
        );
    }

    #[test]
    fn test_split_arithmetic_rejects_bad_term_counts() {
        for operand in ["day + 1 + 2", "day +- 1", "day *** 2", "2022-12-19x + 1", "easter + -1"] {
            assert!(
                matches!(split_arithmetic(operand), Err(DateCriteriaError::Grammar(_))),
                "Expected failure for: {}",
                operand
            );
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            parse_date_literal("2022-12-25"),
            NaiveDate::from_ymd_opt(2022, 12, 25)
        );
        assert_eq!(parse_date_literal("2022-2-25"), None);
        assert_eq!(parse_date_literal("2022-02-30"), None);
        assert!(is_date_shaped("2022-02-30"));

        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("-3"), Some(-3));
        assert_eq!(parse_int_literal("+3"), Some(3));
        assert_eq!(parse_int_literal("3 "), None);
        assert_eq!(parse_int_literal("day"), None);
    }
}
