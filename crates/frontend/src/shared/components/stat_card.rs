use super::number_format::format_value;
use contracts::kpi::{KpiMetric, KpiStatus};
use leptos::prelude::*;

/// KPI card: formatted value, target attainment and change vs the
/// previous period.
#[component]
pub fn StatCard(metric: KpiMetric) -> impl IntoView {
    let status_class = match metric.status {
        KpiStatus::Good => "stat-card stat-card--success",
        KpiStatus::Bad => "stat-card stat-card--error",
        KpiStatus::Warning => "stat-card stat-card--warning",
        KpiStatus::Neutral => "stat-card",
    };

    let formatted = format_value(metric.value, &metric.format);

    let change_view = metric.change_percent().map(|pct| {
        let (arrow, cls) = if pct > 0.5 {
            ("\u{2191}", "stat-card__change stat-card__change--up")
        } else if pct < -0.5 {
            ("\u{2193}", "stat-card__change stat-card__change--down")
        } else {
            ("", "stat-card__change stat-card__change--flat")
        };
        let text = format!("{}{:.1}%", arrow, pct.abs());
        view! { <span class=cls>{text}</span> }
    });

    let target_view = (metric.target > 0.0).then(|| {
        let text = format!("план: {}", format_value(metric.target, &metric.format));
        view! { <div class="stat-card__subtitle">{text}</div> }
    });

    view! {
        <div class=status_class>
            <div class="stat-card__content">
                <div class="stat-card__label">{metric.label.clone()}</div>
                <div class="stat-card__value">
                    {formatted}
                    {change_view}
                </div>
                {target_view}
            </div>
        </div>
    }
}
