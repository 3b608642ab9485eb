//! Configuration module for rule set definitions
//!
//! Criteria can be described as data (JSON via serde) and built in one step.

mod criteria;

pub use criteria::*;
