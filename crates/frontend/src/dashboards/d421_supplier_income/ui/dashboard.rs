use super::super::api::{self, DIM_DATE, DIM_WAREHOUSE};
use crate::shared::api::{CubeClient, RequestSequence};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::number_format::format_money;
use crate::shared::date_utils::format_date;
use crate::shared::notify::use_toasts;
use crate::shared::state::{filter_signal, FilterStore};
use chrono::NaiveDate;
use contracts::analytics::QueryFilter;
use leptos::children::ToChildren;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Таблица поставок: выручка и количество по складам и предметам.
#[component]
pub fn SupplierIncomeDashboard() -> impl IntoView {
    let filter_store = use_context::<FilterStore>().expect("FilterStore context not found");
    let client = use_context::<CubeClient>().expect("CubeClient context not found");
    let toasts = use_toasts();

    let filter_state = filter_signal(&filter_store);
    let is_expanded = RwSignal::new(true);

    let rows = RwSignal::new(Vec::<Vec<String>>::new());
    let warehouses = RwSignal::new(Vec::<String>::new());
    let loading = RwSignal::new(false);
    let error_msg = RwSignal::new(None::<String>);

    // Reload the table whenever the global filter selection changes.
    // Ticketed: a stale response is dropped instead of overwriting a
    // newer one.
    let sequence = RequestSequence::new();
    {
        let client = client.clone();
        let sequence = sequence.clone();
        Effect::new(move |_| {
            let state = filter_state.get();
            let client = client.clone();
            let sequence = sequence.clone();
            let ticket = sequence.begin();
            loading.set(true);
            error_msg.set(None);

            spawn_local(async move {
                let result = api::load_income(&client, &state).await;
                if !sequence.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(result_set) => rows.set(result_set.table_pivot()),
                    Err(e) => {
                        error_msg.set(Some(e.to_string()));
                        toasts.error(format!("Поставки: {e}"));
                    }
                }
            });
        });
    }

    // Distinct warehouse list for the dropdown; its own pending selection
    // is excluded from the query. Ticketed with its own sequence so a
    // stale reply cannot overwrite a newer list.
    {
        let client = client.clone();
        let picker_sequence = RequestSequence::new();
        Effect::new(move |_| {
            let state = filter_state.get();
            let client = client.clone();
            let sequence = picker_sequence.clone();
            let ticket = sequence.begin();
            spawn_local(async move {
                let result = client.distinct_values(&state, DIM_WAREHOUSE).await;
                if !sequence.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(values) => warehouses.set(values),
                    Err(e) => log::warn!("distinct warehouses failed: {e}"),
                }
            });
        });
    }

    let warehouse_select = {
        let store = filter_store.clone();
        move || {
            let store = store.clone();
            let selected = filter_state
                .get()
                .filters
                .get(DIM_WAREHOUSE)
                .and_then(|f| f.values.first().cloned())
                .unwrap_or_default();
            let options = warehouses
                .get()
                .into_iter()
                .map(|w| {
                    let is_selected = w == selected;
                    view! { <option value=w.clone() selected=is_selected>{w.clone()}</option> }
                })
                .collect_view();
            view! {
                <select
                    class="filter-field"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if value.is_empty() {
                            store.remove_filter(DIM_WAREHOUSE);
                        } else {
                            store.set_filter(QueryFilter::equals(DIM_WAREHOUSE, vec![value]));
                        }
                    }
                >
                    <option value="">"Все склады"</option>
                    {options}
                </select>
            }
        }
    };

    let date_inputs = {
        let store = filter_store.clone();
        move || {
            let range = filter_state.get().date_ranges.get(DIM_DATE).copied();
            let from_value = range.map(|(f, _)| f.to_string()).unwrap_or_default();
            let to_value = range.map(|(_, t)| t.to_string()).unwrap_or_default();
            let store_from = store.clone();
            let store_to = store.clone();
            view! {
                <input
                    type="date"
                    class="filter-field"
                    prop:value=from_value
                    on:change=move |ev| {
                        update_range(&store_from, event_target_value(&ev), true);
                    }
                />
                <input
                    type="date"
                    class="filter-field"
                    prop:value=to_value
                    on:change=move |ev| {
                        update_range(&store_to, event_target_value(&ev), false);
                    }
                />
            }
        }
    };

    let table_body = move || {
        rows.get()
            .into_iter()
            .map(|row| {
                let warehouse = row.first().cloned().unwrap_or_default();
                let subject = row.get(1).cloned().unwrap_or_default();
                let quantity = row.get(2).cloned().unwrap_or_default();
                let total = row
                    .get(3)
                    .and_then(|v| v.parse::<f64>().ok())
                    .map(format_money)
                    .unwrap_or_default();
                view! {
                    <tr>
                        <td>{warehouse}</td>
                        <td>{subject}</td>
                        <td class="num">{quantity}</td>
                        <td class="num">{total}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let period_label = move || {
        filter_state
            .get()
            .date_ranges
            .get(DIM_DATE)
            .map(|(from, to)| {
                format!(
                    "{} — {}",
                    format_date(&from.to_string()),
                    format_date(&to.to_string())
                )
            })
            .unwrap_or_else(|| "за всё время".to_string())
    };

    let filter_content: ChildrenFn = ToChildren::to_children(move || {
        view! {
            <div class="filter-form">
                {date_inputs()}
                {warehouse_select()}
            </div>
        }
        .into_any()
    });

    view! {
        <div class="dashboard dashboard--supplier-income">
            <div class="page-header">
                <h2>"Поставки"</h2>
                <span class="page-header__subtitle">{period_label}</span>
            </div>

            <FilterPanel
                is_expanded=is_expanded
                filter_state=filter_state
                store=filter_store.clone()
                filter_content=filter_content
            />

            {move || error_msg.get().map(|e| view! { <div class="error-banner">{e}</div> })}

            <table class="data-table" class:data-table--loading=move || loading.get()>
                <thead>
                    <tr>
                        <th>"Склад"</th>
                        <th>"Предмет"</th>
                        <th class="num">"Количество"</th>
                        <th class="num">"Сумма, ₽"</th>
                    </tr>
                </thead>
                <tbody>{table_body}</tbody>
            </table>
        </div>
    }
}

fn update_range(store: &FilterStore, value: String, is_from: bool) {
    let Ok(date) = value.parse::<NaiveDate>() else {
        store.set_date_range(DIM_DATE, None);
        return;
    };
    let current = store.with(|s| s.date_ranges.get(DIM_DATE).copied());
    let range = match (current, is_from) {
        (Some((_, to)), true) if date <= to => (date, to),
        (Some((from, _)), false) if from <= date => (from, date),
        _ => (date, date),
    };
    store.set_date_range(DIM_DATE, Some(range));
}
