use crate::shared::components::number_format::format_number_with_decimals;
use crate::shared::date_utils::format_datetime;
use crate::shared::state::{operational_signal, OperationalStore};
use contracts::alerts::{Alert, AlertSeverity};
use leptos::prelude::*;

fn severity_class(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Critical => "alert-card alert-card--critical",
        AlertSeverity::Warning => "alert-card alert-card--warning",
        AlertSeverity::Info => "alert-card alert-card--info",
    }
}

/// Alert feed with severity tabs, unread badge, and per-alert
/// read/mute/expand/dismiss controls. All state lives in the
/// [`OperationalStore`]; the panel only renders snapshots.
#[component]
pub fn AlertPanel(store: OperationalStore) -> impl IntoView {
    let state = operational_signal(&store);

    let critical_badge = move || {
        let count = state.get().critical_count();
        if count > 0 {
            view! { <span class="badge badge--critical">{count}</span> }.into_any()
        } else {
            view! { <></> }.into_any()
        }
    };

    let severity_tabs = {
        let store = store.clone();
        move || {
            let tabs: [(Option<AlertSeverity>, &str); 4] = [
                (None, "Все"),
                (Some(AlertSeverity::Critical), "Критичные"),
                (Some(AlertSeverity::Warning), "Предупреждения"),
                (Some(AlertSeverity::Info), "Инфо"),
            ];
            let active = state.get().severity_filter;
            tabs.into_iter()
                .map(|(severity, label)| {
                    let store = store.clone();
                    let cls = if active == severity {
                        "alert-panel__tab alert-panel__tab--active"
                    } else {
                        "alert-panel__tab"
                    };
                    view! {
                        <button class=cls on:click=move |_| store.set_severity_filter(severity)>
                            {label}
                        </button>
                    }
                })
                .collect_view()
        }
    };

    let mark_all_store = store.clone();
    let cards_store = store.clone();

    view! {
        <div class="alert-panel">
            <div class="alert-panel__header">
                <span class="alert-panel__title">"Оповещения"</span>
                {critical_badge}
                <button
                    class="alert-panel__mark-all"
                    on:click=move |_| mark_all_store.mark_all_read()
                >
                    "Прочитать все"
                </button>
            </div>
            <div class="alert-panel__tabs">{severity_tabs}</div>
            <div class="alert-panel__list">
                <For
                    each=move || state.get().filtered_alerts()
                    key=|alert| (alert.id.clone(), alert.is_read)
                    children=move |alert: Alert| {
                        let id = alert.id.clone();
                        let expanded = Signal::derive(move || state.get().expanded.contains(&id));
                        view! { <AlertCard alert=alert store=cards_store.clone() expanded=expanded /> }
                    }
                />
            </div>
        </div>
    }
}

#[component]
fn AlertCard(alert: Alert, store: OperationalStore, expanded: Signal<bool>) -> impl IntoView {
    let id = alert.id.clone();
    let read_store = store.clone();
    let mute_store = store.clone();
    let dismiss_store = store.clone();
    let expand_store = store.clone();
    let read_id = id.clone();
    let mute_id = id.clone();
    let dismiss_id = id.clone();

    let metric_view = alert.metric.as_ref().map(|m| {
        let text = format!(
            "{} {} (порог {} {})",
            format_number_with_decimals(m.current, 1),
            m.unit,
            format_number_with_decimals(m.threshold, 1),
            m.unit
        );
        view! { <div class="alert-card__metric">{text}</div> }
    });

    let items = alert.affected_items.join(", ");
    let actions = alert.actions.clone();
    // Reads the expansion flag reactively: the list keys stay the same
    // across a toggle, so the card itself has to track it.
    let details = move || {
        expanded.get().then(|| {
            let buttons = actions
                .iter()
                .map(|a| {
                    let label = a.label.clone();
                    view! { <button class="alert-card__action">{label}</button> }
                })
                .collect_view();
            view! {
                <div class="alert-card__details">
                    <div class="alert-card__items">{items.clone()}</div>
                    <div class="alert-card__actions">{buttons}</div>
                </div>
            }
        })
    };

    view! {
        <div
            class=severity_class(alert.severity)
            class:alert-card--read=alert.is_read
            on:click=move |_| expand_store.toggle_expanded(&id)
        >
            <div class="alert-card__header">
                <span class="alert-card__title">{alert.title.clone()}</span>
                <span class="alert-card__time">
                    {format_datetime(
                        &alert.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    )}
                </span>
            </div>
            <div class="alert-card__description">{alert.description.clone()}</div>
            {metric_view}
            {details}
            <div class="alert-card__controls">
                <button on:click=move |e| {
                    e.stop_propagation();
                    read_store.mark_read(&read_id);
                }>"Прочитано"</button>
                <button on:click=move |e| {
                    e.stop_propagation();
                    mute_store.toggle_mute(&mute_id);
                }>"Заглушить"</button>
                <button on:click=move |e| {
                    e.stop_propagation();
                    dismiss_store.dismiss(&dismiss_id);
                }>"Скрыть"</button>
            </div>
        </div>
    }
}
