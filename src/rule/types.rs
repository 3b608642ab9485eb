//! Core value types of the rule language

use chrono::{NaiveDate, Weekday};
use std::fmt;

/// Named, date-dependent quantity usable as a bare operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// The queried date itself
    Date,
    Day,
    Month,
    Year,
    DayOfWeek,
    /// Days since 0001-01-01
    DayNumber,
    /// 1-based ordinal within the year
    DayOfYear,
    /// Easter Sunday of the queried date's year
    Easter,
    /// Last day of the queried date's month
    EndOfMonth,
}

/// Lowercase spelling of every token
const TOKEN_NAMES: [(&str, Token); 9] = [
    ("date", Token::Date),
    ("day", Token::Day),
    ("month", Token::Month),
    ("year", Token::Year),
    ("dayofweek", Token::DayOfWeek),
    ("daynumber", Token::DayNumber),
    ("dayofyear", Token::DayOfYear),
    ("easter", Token::Easter),
    ("endofmonth", Token::EndOfMonth),
];

/// Lowercase spelling of every day of week
const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

impl Token {
    /// Case-insensitive lookup of a token name
    pub fn parse(name: &str) -> Option<Token> {
        TOKEN_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, token)| token)
    }

    /// Category of the value this token resolves to
    pub fn category(self) -> ValueCategory {
        match self {
            Token::Date | Token::Easter | Token::EndOfMonth => ValueCategory::Date,
            Token::DayOfWeek => ValueCategory::DayOfWeek,
            Token::Day | Token::Month | Token::Year | Token::DayNumber | Token::DayOfYear => {
                ValueCategory::Integer
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Token::Date => "Date",
            Token::Day => "Day",
            Token::Month => "Month",
            Token::Year => "Year",
            Token::DayOfWeek => "DayOfWeek",
            Token::DayNumber => "DayNumber",
            Token::DayOfYear => "DayOfYear",
            Token::Easter => "Easter",
            Token::EndOfMonth => "EndOfMonth",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive lookup of a day-of-week name ("Sunday", "monday", ...)
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, day)| day)
}

/// Comparability class shared by both sides of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCategory {
    Date,
    DayOfWeek,
    Integer,
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueCategory::Date => "Date",
            ValueCategory::DayOfWeek => "DayOfWeek",
            ValueCategory::Integer => "Integer",
        })
    }
}

/// Value produced by evaluating an operand against a concrete date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedValue {
    Date(NaiveDate),
    Integer(i64),
    DayOfWeek(Weekday),
}

impl ResolvedValue {
    pub fn category(&self) -> ValueCategory {
        match self {
            ResolvedValue::Date(_) => ValueCategory::Date,
            ResolvedValue::Integer(_) => ValueCategory::Integer,
            ResolvedValue::DayOfWeek(_) => ValueCategory::DayOfWeek,
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Less than (<)
    Less,
    /// Less than or equal (<=)
    LessEqual,
    /// Greater than (>)
    Greater,
    /// Greater than or equal (>=)
    GreaterEqual,
}

impl ComparisonOp {
    pub fn parse(symbol: &str) -> Option<ComparisonOp> {
        match symbol {
            "==" => Some(ComparisonOp::Equal),
            "!=" => Some(ComparisonOp::NotEqual),
            "<" => Some(ComparisonOp::Less),
            "<=" => Some(ComparisonOp::LessEqual),
            ">" => Some(ComparisonOp::Greater),
            ">=" => Some(ComparisonOp::GreaterEqual),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Binary arithmetic operators recognised inside an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl ArithmeticOp {
    pub fn parse(symbol: &str) -> Option<ArithmeticOp> {
        match symbol {
            "+" => Some(ArithmeticOp::Add),
            "-" => Some(ArithmeticOp::Subtract),
            "*" => Some(ArithmeticOp::Multiply),
            "/" => Some(ArithmeticOp::Divide),
            "%" => Some(ArithmeticOp::Remainder),
            "**" => Some(ArithmeticOp::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Remainder => "%",
            ArithmeticOp::Power => "**",
        }
    }

    /// Whether the operator shifts by an offset (`+`/`-`)
    pub fn is_offset(self) -> bool {
        matches!(self, ArithmeticOp::Add | ArithmeticOp::Subtract)
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
