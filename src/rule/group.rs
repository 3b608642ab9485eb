//! Rules: AND-groups of constraints

use crate::error::Result;
use crate::rule::constraint::Constraint;
use crate::rule::parser::split_clauses;
use ahash::RandomState;
use chrono::NaiveDate;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed seeds so the order-independent constraint hash is stable
const CONSTRAINT_HASH_SEEDS: (u64, u64, u64, u64) = (
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

/// Compiled rule: matches a date iff every constraint holds, XOR `negate`
#[derive(Debug, Clone)]
pub struct Rule {
    name: Option<String>,
    negate: bool,
    /// Unique by constraint equality, in declaration order
    constraints: SmallVec<[Constraint; 4]>,
}

impl Rule {
    /// Compile `;`-separated clauses into a rule
    ///
    /// An empty name is treated as no name. Duplicate clauses collapse.
    pub fn compile(text: &str, negate: bool, name: Option<&str>) -> Result<Rule> {
        let mut constraints: SmallVec<[Constraint; 4]> = SmallVec::new();
        for clause in split_clauses(text) {
            let constraint = Constraint::compile(clause)?;
            if !constraints.contains(&constraint) {
                constraints.push(constraint);
            }
        }

        Ok(Rule {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            negate,
            constraints,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// AND over the constraints, XOR `negate`
    ///
    /// A constraint that evaluates to false decides the rule even when
    /// another constraint fails, so the outcome does not depend on clause
    /// order. An error is returned only when no constraint is false.
    pub fn matches(&self, date: NaiveDate) -> Result<bool> {
        let mut failure = None;
        for constraint in &self.constraints {
            match constraint.evaluate(date) {
                Ok(false) => return Ok(self.negate),
                Ok(true) => {}
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(!self.negate),
        }
    }

    fn constraint_set_hash(&self) -> u64 {
        let (k0, k1, k2, k3) = CONSTRAINT_HASH_SEEDS;
        let state = RandomState::with_seeds(k0, k1, k2, k3);
        self.constraints
            .iter()
            .fold(0, |acc, c| acc ^ state.hash_one(c))
    }
}

/// Compile a rule from its text
pub fn compile_rule(text: &str, negate: bool, name: Option<&str>) -> Result<Rule> {
    Rule::compile(text, negate, name)
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.negate == other.negate
            && self.constraints.len() == other.constraints.len()
            && self
                .constraints
                .iter()
                .all(|c| other.constraints.contains(c))
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.negate.hash(state);
        self.constraint_set_hash().hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}
