//! Criteria: OR-groups of rules with a per-date result cache

use crate::criteria::cache::ResultCache;
use crate::config::RuleConfig;
use crate::error::Result;
use crate::rule::Rule;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

/// Construction options for [`Criteria`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaOptions {
    /// Recompute cached results right after rules are added
    pub auto_refresh: bool,
    /// Stop caching new dates once this many are cached; `None` is unbounded
    pub max_cached_dates: Option<usize>,
}

impl Default for CriteriaOptions {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            max_cached_dates: None,
        }
    }
}

/// Rule set and negate flag, mutated together under one lock
#[derive(Debug, Default)]
struct RuleSet {
    negate: bool,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// OR over the rules, XOR `negate`
    ///
    /// A matching rule decides even when another rule fails to evaluate; the
    /// first error is returned only when no rule matches.
    fn evaluate(&self, date: NaiveDate) -> Result<bool> {
        let mut failure = None;
        for rule in &self.rules {
            match rule.matches(date) {
                Ok(true) => return Ok(!self.negate),
                Ok(false) => {}
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(self.negate),
        }
    }
}

/// Named-date collection answering `contains(date)` queries
///
/// Queries may run concurrently from many threads. Structural mutations
/// (adding rules, changing `negate`, refreshing) hold the rule set
/// exclusively for the whole cache pass, so a query never observes a cache
/// entry computed from a different rule set than the one it reads.
///
/// The cache keeps one entry per distinct date queried and is never evicted
/// implicitly. Bound it with [`CriteriaOptions::max_cached_dates`] or drop it
/// with [`Criteria::clear_cache`].
#[derive(Debug)]
pub struct Criteria {
    state: RwLock<RuleSet>,
    cache: ResultCache,
    auto_refresh: AtomicBool,
}

impl Default for Criteria {
    fn default() -> Self {
        Self::new()
    }
}

impl Criteria {
    /// Empty, non-negated criteria with auto-refresh enabled
    pub fn new() -> Self {
        Self::with_options(CriteriaOptions::default())
    }

    pub fn with_options(options: CriteriaOptions) -> Self {
        Self {
            state: RwLock::new(RuleSet::default()),
            cache: ResultCache::with_limit(options.max_cached_dates),
            auto_refresh: AtomicBool::new(options.auto_refresh),
        }
    }

    pub fn negate(&self) -> bool {
        self.state.read().negate
    }

    /// Set the negate flag, flipping every cached result if it changes
    ///
    /// The flip assumes the cache is current; call [`Criteria::refresh_cache`]
    /// first if rules were added with auto-refresh disabled.
    pub fn set_negate(&self, negate: bool) {
        let mut state = self.state.write();
        if state.negate == negate {
            return;
        }

        state.negate = negate;
        self.cache.flip_all();
        debug!(negate, cached = self.cache.len(), "criteria negation changed");
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh.load(Ordering::Relaxed)
    }

    pub fn set_auto_refresh(&self, auto_refresh: bool) {
        self.auto_refresh.store(auto_refresh, Ordering::Relaxed);
    }

    pub fn max_cached_dates(&self) -> Option<usize> {
        self.cache.limit()
    }

    /// Compile and add one rule
    ///
    /// Compile errors are returned before anything is added. Returns whether
    /// the rule was new (an equal rule already present is skipped).
    pub fn add_rule(&self, text: &str, negate: bool, name: Option<&str>) -> Result<bool> {
        let rule = Rule::compile(text, negate, name)?;
        Ok(self.insert_rules(vec![rule]) == 1)
    }

    /// Compile and add several rules, all or nothing
    ///
    /// Returns how many were new.
    pub fn add_rules(&self, rules: &[RuleConfig]) -> Result<usize> {
        let compiled = rules
            .iter()
            .map(RuleConfig::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.insert_rules(compiled))
    }

    /// Add already compiled rules, returning how many were new
    pub fn insert_rules(&self, rules: Vec<Rule>) -> usize {
        let mut state = self.state.write();

        let mut added = 0;
        for rule in rules {
            if state.rules.contains(&rule) {
                debug!(rule = %rule, "skipping duplicate rule");
                continue;
            }
            debug!(
                name = rule.name().unwrap_or(""),
                negate = rule.negate(),
                constraints = rule.constraints().len(),
                "rule added"
            );
            state.rules.push(rule);
            added += 1;
        }

        if added > 0 && self.auto_refresh() {
            self.refresh_locked(&state);
        }
        added
    }

    /// Whether `date` belongs to the collection
    ///
    /// Fails only when evaluation needs data outside a lookup table (e.g.
    /// Easter for a year the table does not cover). Failures are not cached.
    pub fn contains(&self, date: NaiveDate) -> Result<bool> {
        let state = self.state.read();

        // Fast path: cached
        if let Some(result) = self.cache.get(date) {
            return Ok(result);
        }

        trace!(%date, "cache miss");
        let result = state.evaluate(date)?;
        if !self.cache.insert(date, result) {
            trace!(%date, "cache full, result not stored");
        }
        Ok(result)
    }

    /// Evaluate without reading or writing the cache
    pub fn evaluate(&self, date: NaiveDate) -> Result<bool> {
        self.state.read().evaluate(date)
    }

    /// Recompute every cached result against the current rules
    pub fn refresh_cache(&self) {
        let state = self.state.write();
        self.refresh_locked(&state);
    }

    fn refresh_locked(&self, state: &RuleSet) {
        let evicted = self.cache.recompute(|date| state.evaluate(date));
        for (date, err) in &evicted {
            warn!(%date, error = %err, "evicted cache entry that no longer evaluates");
        }
        debug!(
            refreshed = self.cache.len(),
            evicted = evicted.len(),
            "cache refreshed"
        );
    }

    /// Snapshot of the rules, in insertion order
    pub fn rules(&self) -> Vec<Rule> {
        self.state.read().rules.clone()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.state.read().rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().rules.is_empty()
    }

    /// Dates with a cached result, in no particular order
    pub fn cached_dates(&self) -> Vec<NaiveDate> {
        self.cache.dates()
    }

    pub fn clear_cache(&self) {
        let _state = self.state.write();
        self.cache.clear();
    }
}
