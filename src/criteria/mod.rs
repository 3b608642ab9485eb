//! Criteria module
//!
//! OR-combination of rules answering cached `contains(date)` queries.

pub mod cache;
mod engine;


pub use engine::*;
