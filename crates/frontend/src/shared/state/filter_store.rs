use super::store::{Store, Subscription};
use crate::shared::storage;
use chrono::NaiveDate;
use contracts::analytics::QueryFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const STORAGE_KEY: &str = "dashboard_filter_state_v1";

/// Global filter selection shared by every dashboard widget.
///
/// Invariants: at most one filter per dimension, at most one date range per
/// date-dimension key. `BTreeMap` keys give the deterministic
/// dimension-name ordering the query builder relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub filters: BTreeMap<String, QueryFilter>,
    pub date_ranges: BTreeMap<String, (NaiveDate, NaiveDate)>,
}

impl FilterState {
    pub fn active_count(&self) -> usize {
        self.filters.len() + self.date_ranges.len()
    }
}

/// Serialized shape kept in localStorage. Versioned through the storage
/// key; a failed parse falls back to the default state.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedFilters {
    filters: Vec<QueryFilter>,
    date_ranges: BTreeMap<String, (NaiveDate, NaiveDate)>,
}

/// Store of active "equals" filters and date ranges. All mutators are
/// total, synchronous and last-write-wins; every mutation is mirrored to
/// localStorage.
#[derive(Clone)]
pub struct FilterStore {
    store: Store<FilterState>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(FilterState::default()),
        }
    }

    /// Restore the persisted selection, if any.
    pub fn load() -> Self {
        let state = storage::get_item(STORAGE_KEY)
            .and_then(|json| serde_json::from_str::<PersistedFilters>(&json).ok())
            .map(|persisted| FilterState {
                filters: persisted
                    .filters
                    .into_iter()
                    .map(|f| (f.member.clone(), f))
                    .collect(),
                date_ranges: persisted.date_ranges,
            })
            .unwrap_or_default();
        Self {
            store: Store::new(state),
        }
    }

    pub fn state(&self) -> FilterState {
        self.store.get_state()
    }

    pub fn with<R>(&self, f: impl FnOnce(&FilterState) -> R) -> R {
        self.store.with(f)
    }

    #[must_use]
    pub fn subscribe(
        &self,
        listener: impl Fn(&FilterState) + Send + Sync + 'static,
    ) -> Subscription<FilterState> {
        self.store.subscribe(listener)
    }

    /// Upsert by dimension: a second filter for the same dimension replaces
    /// the first.
    pub fn set_filter(&self, filter: QueryFilter) {
        self.store.update(|state| {
            state.filters.insert(filter.member.clone(), filter);
        });
        self.persist();
    }

    pub fn remove_filter(&self, dimension: &str) {
        self.store.update(|state| {
            state.filters.remove(dimension);
        });
        self.persist();
    }

    /// Set or clear the date range for one date dimension.
    pub fn set_date_range(&self, dimension: &str, range: Option<(NaiveDate, NaiveDate)>) {
        self.store.update(|state| match range {
            Some(range) => {
                state.date_ranges.insert(dimension.to_string(), range);
            }
            None => {
                state.date_ranges.remove(dimension);
            }
        });
        self.persist();
    }

    pub fn clear_all(&self) {
        self.store.set_state(FilterState::default());
        storage::remove_item(STORAGE_KEY);
    }

    fn persist(&self) {
        let persisted = self.store.with(|state| PersistedFilters {
            filters: state.filters.values().cloned().collect(),
            date_ranges: state.date_ranges.clone(),
        });
        if let Ok(json) = serde_json::to_string(&persisted) {
            storage::set_item(STORAGE_KEY, &json);
        }
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(dimension: &str, values: &[&str]) -> QueryFilter {
        QueryFilter::equals(dimension, values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_set_filter_upserts_by_dimension() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["Коледино"]));
        store.set_filter(filter("Income.warehouseName", &["Казань"]));

        let state = store.state();
        assert_eq!(state.filters.len(), 1);
        assert_eq!(
            state.filters["Income.warehouseName"].values,
            vec!["Казань".to_string()]
        );
    }

    #[test]
    fn test_remove_filter() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["Казань"]));
        store.set_filter(filter("Income.subject", &["Платья"]));
        store.remove_filter("Income.warehouseName");

        let state = store.state();
        assert_eq!(state.filters.len(), 1);
        assert!(state.filters.contains_key("Income.subject"));
    }

    #[test]
    fn test_date_range_set_and_clear() {
        let store = FilterStore::new();
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        store.set_date_range("Income.date", Some((from, to)));
        assert_eq!(store.state().date_ranges["Income.date"], (from, to));

        store.set_date_range("Income.date", None);
        assert!(store.state().date_ranges.is_empty());
    }

    #[test]
    fn test_clear_all_resets_both_collections() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["Казань"]));
        store.set_date_range(
            "Income.date",
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )),
        );

        store.clear_all();
        assert_eq!(store.state(), FilterState::default());
        assert_eq!(store.state().active_count(), 0);
    }

    #[test]
    fn test_subscribers_see_mutations() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let store = FilterStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let _sub =
            store.subscribe(move |state| count_clone.store(state.filters.len(), Ordering::Relaxed));

        store.set_filter(filter("Income.warehouseName", &["Казань"]));
        store.set_filter(filter("Income.subject", &["Платья"]));
        assert_eq!(count.load(Ordering::Relaxed), 2);
    }
}
