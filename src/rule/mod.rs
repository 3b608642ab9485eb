//! Rule language: parsing, compilation and evaluation
//!
//! This module handles rule strings like "Date == EndOfMonth - 3; DayOfWeek != Wednesday"
//! and evaluates the compiled result against dates.

pub mod comparator;
mod constraint;
mod group;
mod operand;
pub mod parser;
mod types;


pub use constraint::*;
pub use group::*;
pub use operand::*;
pub use types::*;
