//! Criteria and rule definition structures

use crate::criteria::{Criteria, CriteriaOptions};
use crate::error::Result;
use crate::rule::Rule;
use serde::{Deserialize, Serialize};

/// One rule as data
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleConfig {
    /// `;`-separated clauses
    pub text: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RuleConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            negate: false,
            name: None,
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn compile(&self) -> Result<Rule> {
        Rule::compile(&self.text, self.negate, self.name.as_deref())
    }
}

impl From<&Rule> for RuleConfig {
    fn from(rule: &Rule) -> Self {
        Self {
            text: rule.to_string(),
            negate: rule.negate(),
            name: rule.name().map(str::to_string),
        }
    }
}

/// Whole criteria as data
///
/// ```json
/// {
///   "negate": false,
///   "rules": [
///     { "text": "Date == Easter + 1", "name": "easter monday" },
///     { "text": "DayOfWeek == Saturday" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CriteriaConfig {
    #[serde(default)]
    pub negate: bool,
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cached_dates: Option<usize>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

fn default_auto_refresh() -> bool {
    true
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            negate: false,
            auto_refresh: default_auto_refresh(),
            max_cached_dates: None,
            rules: Vec::new(),
        }
    }
}

impl CriteriaConfig {
    /// Parse a JSON definition
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compile every rule and build the criteria, failing on the first bad rule
    pub fn build(&self) -> Result<Criteria> {
        let criteria = Criteria::with_options(CriteriaOptions {
            auto_refresh: self.auto_refresh,
            max_cached_dates: self.max_cached_dates,
        });
        criteria.set_negate(self.negate);
        criteria.add_rules(&self.rules)?;
        Ok(criteria)
    }
}

impl Criteria {
    /// Build criteria from a definition
    pub fn from_config(config: &CriteriaConfig) -> Result<Criteria> {
        config.build()
    }

    /// Definition reproducing the current rules and flags
    pub fn to_config(&self) -> CriteriaConfig {
        CriteriaConfig {
            negate: self.negate(),
            auto_refresh: self.auto_refresh(),
            max_cached_dates: self.max_cached_dates(),
            rules: self.rules().iter().map(RuleConfig::from).collect(),
        }
    }
}
