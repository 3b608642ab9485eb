//! Date Criteria - declarative date rule engine
//!
//! Compiles text rules such as `Date == EndOfMonth - 3` or
//! `DayOfWeek != Wednesday` and answers whether a date belongs to the
//! resulting collection. Python bindings are available via PyO3 with the
//! `python` feature.
//!
//! ```
//! use chrono::NaiveDate;
//! use date_criteria::Criteria;
//!
//! let weekends = Criteria::new();
//! weekends.add_rule("DayOfWeek == Saturday", false, None).unwrap();
//! weekends.add_rule("DayOfWeek == Sunday", false, None).unwrap();
//!
//! let saturday = NaiveDate::from_ymd_opt(2022, 12, 17).unwrap();
//! assert!(weekends.contains(saturday).unwrap());
//! ```

pub mod calendar;
pub mod config;
pub mod criteria;
pub mod error;
pub mod rule;

pub use crate::config::{CriteriaConfig, RuleConfig};
pub use crate::criteria::{Criteria, CriteriaOptions};
pub use crate::error::{DateCriteriaError, Result};
pub use crate::rule::{compile_rule, Constraint, Rule};

#[cfg(feature = "python")]
mod python {
    use crate::config::{CriteriaConfig, RuleConfig};
    use crate::criteria::{Criteria, CriteriaOptions};
    use crate::rule::compile_rule;
    use chrono::NaiveDate;
    use pyo3::prelude::*;

    // ========================================================================
    // Python Classes
    // ========================================================================

    /// Date collection defined by text rules
    #[pyclass(name = "DateCriteria")]
    struct PyDateCriteria {
        inner: Criteria,
    }

    #[pymethods]
    impl PyDateCriteria {
        #[new]
        #[pyo3(signature = (negate=false, auto_refresh=true, max_cached_dates=None))]
        fn new(negate: bool, auto_refresh: bool, max_cached_dates: Option<usize>) -> Self {
            let inner = Criteria::with_options(CriteriaOptions {
                auto_refresh,
                max_cached_dates,
            });
            inner.set_negate(negate);
            Self { inner }
        }

        /// Build from a JSON definition
        #[staticmethod]
        fn from_json(json: &str) -> PyResult<Self> {
            let inner = CriteriaConfig::from_json(json)?.build()?;
            Ok(Self { inner })
        }

        fn to_json(&self) -> PyResult<String> {
            Ok(self.inner.to_config().to_json()?)
        }

        /// Compile and add a rule; returns False if an equal rule exists
        #[pyo3(signature = (text, negate=false, name=None))]
        fn add_rule(&self, text: &str, negate: bool, name: Option<&str>) -> PyResult<bool> {
            Ok(self.inner.add_rule(text, negate, name)?)
        }

        /// Add rules given as (text, negate, name) tuples, all or nothing
        fn add_rules(&self, rules: Vec<(String, bool, Option<String>)>) -> PyResult<usize> {
            let rules: Vec<RuleConfig> = rules
                .into_iter()
                .map(|(text, negate, name)| RuleConfig { text, negate, name })
                .collect();
            Ok(self.inner.add_rules(&rules)?)
        }

        /// Whether the date (datetime.date) belongs to the collection
        fn contains(&self, py: Python<'_>, date: NaiveDate) -> PyResult<bool> {
            let inner = &self.inner;
            Ok(py.detach(|| inner.contains(date))?)
        }

        fn refresh_cache(&self) {
            self.inner.refresh_cache();
        }

        #[getter]
        fn get_negate(&self) -> bool {
            self.inner.negate()
        }

        #[setter]
        fn set_negate(&self, negate: bool) {
            self.inner.set_negate(negate);
        }

        fn __len__(&self) -> usize {
            self.inner.len()
        }

        fn __contains__(&self, py: Python<'_>, date: NaiveDate) -> PyResult<bool> {
            self.contains(py, date)
        }
    }

    // ========================================================================
    // Python Functions
    // ========================================================================

    /// Raise ValueError if the rule text does not compile
    #[pyfunction]
    fn validate_rule(text: &str) -> PyResult<()> {
        compile_rule(text, false, None)?;
        Ok(())
    }

    // ========================================================================
    // Python Module Definition
    // ========================================================================

    #[pymodule]
    fn date_criteria(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(validate_rule, m)?)?;
        m.add_class::<PyDateCriteria>()?;
        Ok(())
    }
}
