use super::super::api;
use crate::shared::api::{CubeClient, RequestSequence};
use crate::shared::components::alert_panel::AlertPanel;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::last_30_days;
use crate::shared::live;
use crate::shared::notify::use_toasts;
use crate::shared::state::{filter_signal, operational_signal, FilterStore, OperationalStore};
use contracts::kpi::KpiMetric;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Сводная панель: карточки KPI, баллы состояния и лента оповещений.
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let filter_store = use_context::<FilterStore>().expect("FilterStore context not found");
    let operational = use_context::<OperationalStore>().expect("OperationalStore context not found");
    let client = use_context::<CubeClient>().expect("CubeClient context not found");
    let toasts = use_toasts();

    let filter_state = filter_signal(&filter_store);
    let op_state = operational_signal(&operational);
    let loading = RwSignal::new(false);

    // Live feed for alert/KPI pushes; the token stops the bounded
    // reconnect loop when the dashboard unmounts.
    let feed_token = live::spawn_feed(client.ws_url(), operational.clone());
    on_cleanup(move || feed_token.cancel());

    // KPI reload on every filter change, latest-wins.
    let sequence = RequestSequence::new();
    {
        let client = client.clone();
        let operational = operational.clone();
        Effect::new(move |_| {
            let state = filter_state.get();
            let client = client.clone();
            let operational = operational.clone();
            let sequence = sequence.clone();
            let ticket = sequence.begin();
            let (from, to) = last_30_days();
            loading.set(true);

            spawn_local(async move {
                let result = api::load_kpis(&client, &state, from, to).await;
                if !sequence.is_current(ticket) {
                    return;
                }
                loading.set(false);
                match result {
                    Ok(kpis) => operational.set_kpis(kpis),
                    Err(e) => toasts.error(format!("KPI: {e}")),
                }
            });
        });
    }

    let score_cards = move || {
        let state = op_state.get();
        let health = state.health_score();
        let performance = state.performance_score();
        let class_for = |score: u32| {
            if score >= 90 {
                "score-card score-card--good"
            } else if score >= 70 {
                "score-card score-card--warning"
            } else {
                "score-card score-card--bad"
            }
        };
        view! {
            <div class=class_for(health)>
                <div class="score-card__label">"Здоровье бизнеса"</div>
                <div class="score-card__value">{health}</div>
            </div>
            <div class=class_for(performance)>
                <div class="score-card__label">"Операционный балл"</div>
                <div class="score-card__value">{performance}</div>
            </div>
        }
    };

    let kpi_cards = move || {
        op_state
            .get()
            .kpis
            .into_iter()
            .map(|metric: KpiMetric| view! { <StatCard metric=metric /> })
            .collect_view()
    };

    view! {
        <div class="dashboard dashboard--overview">
            <div class="page-header">
                <h2>"Сводка"</h2>
                <span class="page-header__subtitle">"последние 30 дней"</span>
            </div>

            <div class="score-grid">{score_cards}</div>

            <div
                class="stat-grid"
                class:stat-grid--loading=move || loading.get()
            >
                {kpi_cards}
            </div>

            <AlertPanel store=operational.clone() />
        </div>
    }
}
