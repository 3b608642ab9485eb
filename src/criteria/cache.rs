//! Per-date result cache - sharded concurrent map with fast hashing

use ahash::RandomState;
use chrono::NaiveDate;
use dashmap::DashMap;

/// Memoised membership results keyed by date
///
/// Entries are spread over independently locked shards, so a lookup or
/// insert only contends with operations on the same shard. Concurrent first
/// queries for the same date may both compute, and the last write wins.
///
/// With a limit set, results for new dates are not stored once the limit is
/// reached. Concurrent inserts may overshoot it by at most one entry per
/// inserting thread.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: DashMap<NaiveDate, bool, RandomState>,
    limit: Option<usize>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache that stops storing new dates once it holds `limit` entries
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            entries: DashMap::default(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.entries.get(&date).map(|entry| *entry.value())
    }

    /// Store a result, returning whether it was kept
    #[inline]
    pub fn insert(&self, date: NaiveDate, result: bool) -> bool {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit && !self.entries.contains_key(&date) {
                return false;
            }
        }
        self.entries.insert(date, result);
        true
    }

    /// Invert every cached result in place
    pub fn flip_all(&self) {
        for mut entry in self.entries.iter_mut() {
            let value = entry.value_mut();
            *value = !*value;
        }
    }

    /// Recompute every entry, evicting the ones whose computation fails
    ///
    /// Returns the evicted dates with their errors.
    pub fn recompute<F, E>(&self, mut compute: F) -> Vec<(NaiveDate, E)>
    where
        F: FnMut(NaiveDate) -> Result<bool, E>,
    {
        let mut evicted = Vec::new();
        self.entries.retain(|date, value| match compute(*date) {
            Ok(result) => {
                *value = result;
                true
            }
            Err(err) => {
                evicted.push((*date, err));
                false
            }
        });
        evicted
    }

    /// Cached dates, in no particular order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 12, d).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let cache = ResultCache::new();
        assert_eq!(cache.get(day(1)), None);

        assert!(cache.insert(day(1), true));
        assert!(cache.insert(day(2), false));
        assert_eq!(cache.get(day(1)), Some(true));
        assert_eq!(cache.get(day(2)), Some(false));
        assert_eq!(cache.len(), 2);

        // Last write wins
        cache.insert(day(1), false);
        assert_eq!(cache.get(day(1)), Some(false));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_flip_all() {
        let cache = ResultCache::new();
        cache.insert(day(1), true);
        cache.insert(day(2), false);

        cache.flip_all();
        assert_eq!(cache.get(day(1)), Some(false));
        assert_eq!(cache.get(day(2)), Some(true));
    }

    #[test]
    fn test_recompute_evicts_failures() {
        let cache = ResultCache::new();
        for d in 1..=4 {
            cache.insert(day(d), false);
        }

        let evicted = cache.recompute(|date| {
            if date == day(3) {
                Err("boom")
            } else {
                Ok(true)
            }
        });

        assert_eq!(evicted, vec![(day(3), "boom")]);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(day(3)), None);
        assert_eq!(cache.get(day(1)), Some(true));
    }

    #[test]
    fn test_limit_stops_new_dates() {
        let cache = ResultCache::with_limit(Some(2));
        assert_eq!(cache.limit(), Some(2));
        assert!(cache.insert(day(1), true));
        assert!(cache.insert(day(2), true));

        assert!(!cache.insert(day(3), true));
        assert_eq!(cache.get(day(3)), None);
        assert_eq!(cache.len(), 2);

        // Existing dates can still be updated
        assert!(cache.insert(day(1), false));
        assert_eq!(cache.get(day(1)), Some(false));

        cache.clear();
        assert!(cache.insert(day(3), true));
    }

    #[test]
    fn test_concurrent_inserts_on_distinct_dates() {
        let cache = std::sync::Arc::new(ResultCache::new());
        let handles: Vec<_> = (0..4u32)
            .map(|worker| {
                let cache = std::sync::Arc::clone(&cache);
                std::thread::spawn(move || {
                    for ordinal in 1..=90u32 {
                        let date = NaiveDate::from_yo_opt(2022, worker * 90 + ordinal).unwrap();
                        cache.insert(date, ordinal % 2 == 0);
                        assert_eq!(cache.get(date), Some(ordinal % 2 == 0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 360);
    }

    #[test]
    fn test_clear() {
        let cache = ResultCache::new();
        cache.insert(day(1), true);
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.dates().is_empty());
    }
}
