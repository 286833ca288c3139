use crate::shared::date_utils::format_date;
use crate::shared::state::{FilterState, FilterStore};
use leptos::prelude::*;

/// What a chip removes when its cross is clicked.
#[derive(Debug, Clone, PartialEq)]
enum ChipTarget {
    Filter(String),
    DateRange(String),
}

/// One chip per active filter and per active date range, so the chip list
/// always agrees with `active_count()`.
fn chips(state: &FilterState) -> Vec<(String, ChipTarget)> {
    let mut out: Vec<(String, ChipTarget)> = state
        .filters
        .values()
        .map(|filter| {
            (
                format!("{}: {}", short_name(&filter.member), filter.values.join(", ")),
                ChipTarget::Filter(filter.member.clone()),
            )
        })
        .collect();
    out.extend(state.date_ranges.iter().map(|(dimension, (from, to))| {
        (
            format!(
                "{}: {} — {}",
                short_name(dimension),
                format_date(&from.to_string()),
                format_date(&to.to_string())
            ),
            ChipTarget::DateRange(dimension.clone()),
        )
    }));
    out
}

/// FilterPanel - collapsible panel showing the active global filter
/// selection as removable chips, with the filter form as children.
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Reactive snapshot of the global filter state
    #[prop(into)]
    filter_state: Signal<FilterState>,

    /// The shared filter store (chip removal, clear-all)
    store: FilterStore,

    /// Filter content (form fields)
    #[prop(into)]
    filter_content: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    let clear_store = store.clone();
    let active_count = move || filter_state.get().active_count();

    let tags = {
        let store = store.clone();
        move || {
            let store = store.clone();
            chips(&filter_state.get())
                .into_iter()
                .map(|(label, target)| {
                    let store = store.clone();
                    view! {
                        <FilterTag
                            label=label
                            on_remove=Callback::new(move |_| match &target {
                                ChipTarget::Filter(member) => store.remove_filter(member),
                                ChipTarget::DateRange(dimension) => {
                                    store.set_date_range(dimension, None)
                                }
                            })
                        />
                    }
                })
                .collect_view()
        }
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>"▾"</span>
                    <span class="filter-panel__title">"Фильтры"</span>
                    {move || {
                        let count = active_count();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{count}</span>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                <div class="filter-panel-header__right">
                    <button
                        class="filter-panel__clear"
                        on:click=move |_| clear_store.clear_all()
                    >
                        "Сбросить все"
                    </button>
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content()}
                    <div class="filter-panel__tags">{tags}</div>
                </div>
            </div>
        </div>
    }
}

/// FilterTag - individual filter chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                "×"
            </span>
        </div>
    }
}

/// "Income.warehouseName" -> "warehouseName" for chip labels.
fn short_name(member: &str) -> &str {
    member.rsplit('.').next().unwrap_or(member)
}

#[cfg(test)]
mod tests {
    use super::{chips, short_name, ChipTarget};
    use crate::shared::state::FilterStore;
    use chrono::NaiveDate;
    use contracts::analytics::QueryFilter;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Income.warehouseName"), "warehouseName");
        assert_eq!(short_name("warehouseName"), "warehouseName");
    }

    #[test]
    fn test_one_chip_per_active_selection() {
        let store = FilterStore::new();
        store.set_filter(QueryFilter::equals(
            "Income.warehouseName",
            vec!["Казань".to_string()],
        ));
        store.set_date_range(
            "Income.date",
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )),
        );

        let state = store.state();
        let items = chips(&state);
        assert_eq!(items.len(), state.active_count());
        assert_eq!(items[0].0, "warehouseName: Казань");
        assert_eq!(
            items[1],
            (
                "date: 01.01.2024 — 31.01.2024".to_string(),
                ChipTarget::DateRange("Income.date".to_string()),
            )
        );
    }
}
