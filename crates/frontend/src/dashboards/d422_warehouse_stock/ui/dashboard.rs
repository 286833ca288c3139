use super::super::api::{self, StockRow, DIM_WAREHOUSE};
use crate::shared::api::{CubeClient, RequestSequence};
use crate::shared::components::number_format::format_number_int;
use crate::shared::notify::use_toasts;
use crate::shared::state::{filter_signal, FilterStore};
use contracts::analytics::QueryFilter;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Остатки по складам: на складе, в пути к клиенту и от клиента.
#[component]
pub fn WarehouseStockDashboard() -> impl IntoView {
    let filter_store = use_context::<FilterStore>().expect("FilterStore context not found");
    let client = use_context::<CubeClient>().expect("CubeClient context not found");
    let toasts = use_toasts();

    let filter_state = filter_signal(&filter_store);
    let rows = RwSignal::new(Vec::<StockRow>::new());
    let warehouses = RwSignal::new(Vec::<String>::new());
    let loading = RwSignal::new(false);
    let error_msg = RwSignal::new(None::<String>);

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
                let result = api::load_stock(&client, &state).await;
                if !sequence.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(stock) => rows.set(stock),
                    Err(e) => {
                        error_msg.set(Some(e.to_string()));
                        toasts.error(format!("Остатки: {e}"));
                    }
                }
            });
        });
    }

    // Warehouse picker list, with the picker's own dimension excluded
    // from the filters. Ticketed with its own sequence so a stale reply
    // cannot overwrite a newer list.
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

    let picker = {
        let store = filter_store.clone();
        move || {
            let selected: Vec<String> = filter_state
                .get()
                .filters
                .get(DIM_WAREHOUSE)
                .map(|f| f.values.clone())
                .unwrap_or_default();
            let store = store.clone();
            warehouses
                .get()
                .into_iter()
                .map(|warehouse| {
                    let store = store.clone();
                    let is_active = selected.contains(&warehouse);
                    let mut next = selected.clone();
                    let name = warehouse.clone();
                    view! {
                        <button
                            class=if is_active {
                                "picker-chip picker-chip--active"
                            } else {
                                "picker-chip"
                            }
                            on:click=move |_| {
                                if is_active {
                                    next.retain(|w| w != &name);
                                } else if !next.contains(&name) {
                                    next.push(name.clone());
                                }
                                if next.is_empty() {
                                    store.remove_filter(DIM_WAREHOUSE);
                                } else {
                                    store.set_filter(QueryFilter::equals(
                                        DIM_WAREHOUSE,
                                        next.clone(),
                                    ));
                                }
                            }
                        >
                            {warehouse.clone()}
                        </button>
                    }
                })
                .collect_view()
        }
    };

    let body = move || {
        let data = rows.get();
        let totals = api::totals(&data);
        let data_rows = data
            .into_iter()
            .map(|row| {
                view! {
                    <tr>
                        <td>{row.warehouse.clone()}</td>
                        <td class="num">{format_number_int(row.quantity)}</td>
                        <td class="num">{format_number_int(row.in_way_to_client)}</td>
                        <td class="num">{format_number_int(row.in_way_from_client)}</td>
                        <td class="num">{format_number_int(row.total())}</td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            {data_rows}
            <tr class="totals-row">
                <td>{totals.warehouse.clone()}</td>
                <td class="num">{format_number_int(totals.quantity)}</td>
                <td class="num">{format_number_int(totals.in_way_to_client)}</td>
                <td class="num">{format_number_int(totals.in_way_from_client)}</td>
                <td class="num">{format_number_int(totals.total())}</td>
            </tr>
        }
    };

    view! {
        <div class="dashboard dashboard--warehouse-stock">
            <div class="page-header">
                <h2>"Склады и остатки"</h2>
            </div>

            <div class="picker-row">{picker}</div>

            {move || error_msg.get().map(|e| view! { <div class="error-banner">{e}</div> })}

            <table class="data-table" class:data-table--loading=move || loading.get()>
                <thead>
                    <tr>
                        <th>"Склад"</th>
                        <th class="num">"Остаток"</th>
                        <th class="num">"К клиенту"</th>
                        <th class="num">"От клиента"</th>
                        <th class="num">"Всего"</th>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}
