//! Query composition: turns the current filter selection into the
//! declarative descriptor the analytics API takes.

use crate::shared::state::FilterState;
use contracts::analytics::{Granularity, Query, QueryFilter, TimeDimension};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The filter-derived part of a query descriptor. Widgets merge this with
/// their own measures/dimensions via [`QueryFragment::into_query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFragment {
    pub filters: Vec<QueryFilter>,
    pub time_dimensions: Vec<TimeDimension>,
}

impl QueryFragment {
    pub fn into_query(self, measures: Vec<String>, dimensions: Vec<String>) -> Query {
        Query {
            measures,
            dimensions,
            filters: self.filters,
            time_dimensions: self.time_dimensions,
            ..Default::default()
        }
    }
}

/// Build the filter clauses for a query from a filter-state snapshot.
///
/// Pure over its arguments: callers re-invoke on store change. Dimensions
/// listed in `exclude` are dropped, so a widget fetching the distinct
/// values of dimension X does not filter by its own pending selection on X.
/// Output is sorted by dimension name; date ranges serialize to
/// `YYYY-MM-DD` at day granularity.
pub fn build_query(state: &FilterState, exclude: &[&str]) -> QueryFragment {
    let filters = state
        .filters
        .iter()
        .filter(|(dimension, _)| !exclude.contains(&dimension.as_str()))
        .map(|(_, filter)| filter.clone())
        .collect();

    let time_dimensions = state
        .date_ranges
        .iter()
        .filter(|(dimension, _)| !exclude.contains(&dimension.as_str()))
        .map(|(dimension, (from, to))| TimeDimension {
            dimension: dimension.clone(),
            granularity: Granularity::Day,
            date_range: [
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string(),
            ],
        })
        .collect();

    QueryFragment {
        filters,
        time_dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::FilterStore;
    use chrono::NaiveDate;

    fn filter(dimension: &str, values: &[&str]) -> QueryFilter {
        QueryFilter::equals(dimension, values.iter().map(|s| s.to_string()).collect())
    }

    fn range(y1: i32, m1: u32, d1: u32, y2: i32, m2: u32, d2: u32) -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(y1, m1, d1).unwrap(),
            NaiveDate::from_ymd_opt(y2, m2, d2).unwrap(),
        )
    }

    #[test]
    fn test_exclusion_drops_exactly_the_listed_dimensions() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["Коледино"]));
        store.set_filter(filter("Income.subject", &["Платья"]));
        store.set_filter(filter("Income.brand", &["Acme"]));

        let fragment = build_query(&store.state(), &["Income.warehouseName"]);
        let members: Vec<&str> = fragment.filters.iter().map(|f| f.member.as_str()).collect();
        assert_eq!(members, vec!["Income.brand", "Income.subject"]);
    }

    #[test]
    fn test_exclusion_applies_to_time_dimensions_too() {
        let store = FilterStore::new();
        store.set_date_range("Income.date", Some(range(2024, 1, 1, 2024, 1, 31)));
        store.set_date_range("Stocks.date", Some(range(2024, 2, 1, 2024, 2, 29)));

        let fragment = build_query(&store.state(), &["Stocks.date"]);
        assert_eq!(fragment.time_dimensions.len(), 1);
        assert_eq!(fragment.time_dimensions[0].dimension, "Income.date");
    }

    #[test]
    fn test_last_write_wins_produces_single_filter() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["A"]));
        store.set_filter(filter("Income.warehouseName", &["B"]));

        let fragment = build_query(&store.state(), &[]);
        assert_eq!(fragment.filters.len(), 1);
        assert_eq!(fragment.filters[0].values, vec!["B".to_string()]);
    }

    #[test]
    fn test_clear_all_yields_empty_fragment() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["A"]));
        store.set_date_range("Income.date", Some(range(2024, 1, 1, 2024, 1, 31)));
        store.clear_all();

        assert_eq!(build_query(&store.state(), &[]), QueryFragment::default());
    }

    #[test]
    fn test_date_range_serialization() {
        let store = FilterStore::new();
        store.set_date_range("Income.date", Some(range(2024, 3, 5, 2024, 3, 9)));

        let fragment = build_query(&store.state(), &[]);
        let td = &fragment.time_dimensions[0];
        assert_eq!(td.granularity, Granularity::Day);
        assert_eq!(td.date_range, ["2024-03-05".to_string(), "2024-03-09".to_string()]);
    }

    #[test]
    fn test_filters_sorted_by_dimension_regardless_of_insertion() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.subject", &["x"]));
        store.set_filter(filter("Income.brand", &["y"]));

        let fragment = build_query(&store.state(), &[]);
        let members: Vec<&str> = fragment.filters.iter().map(|f| f.member.as_str()).collect();
        assert_eq!(members, vec!["Income.brand", "Income.subject"]);
    }

    #[test]
    fn test_into_query_carries_fragment() {
        let store = FilterStore::new();
        store.set_filter(filter("Income.warehouseName", &["Казань"]));

        let query = build_query(&store.state(), &[]).into_query(
            vec!["Income.totalPrice".to_string()],
            vec!["Income.warehouseName".to_string()],
        );
        assert_eq!(query.measures, vec!["Income.totalPrice".to_string()]);
        assert_eq!(query.filters.len(), 1);
        assert!(query.order.is_empty());
    }
}
