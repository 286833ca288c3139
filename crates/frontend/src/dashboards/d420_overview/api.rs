use crate::shared::api::{ApiError, CubeClient};
use crate::shared::query::build_query;
use crate::shared::state::FilterState;
use chrono::{Duration, NaiveDate};
use contracts::analytics::{Granularity, ResultSet, TimeDimension};
use contracts::kpi::{KpiMetric, KpiStatus, Trend, ValueFormat};

pub const DIM_DATE: &str = "Sales.date";

struct KpiDef {
    id: &'static str,
    label: &'static str,
    measure: &'static str,
    target: f64,
    format: ValueFormat,
}

fn kpi_defs() -> Vec<KpiDef> {
    vec![
        KpiDef {
            id: "revenue",
            label: "Выручка",
            measure: "Sales.totalRevenue",
            target: 3_000_000.0,
            format: ValueFormat::Money {
                currency: "₽".to_string(),
            },
        },
        KpiDef {
            id: "orders",
            label: "Заказы",
            measure: "Sales.ordersCount",
            target: 5_000.0,
            format: ValueFormat::Integer,
        },
        KpiDef {
            id: "buyout",
            label: "Процент выкупа",
            measure: "Sales.buyoutPercent",
            target: 95.0,
            format: ValueFormat::Percent { decimals: 1 },
        },
    ]
}

/// One aggregate row for a period, under the global filter selection.
async fn load_totals(
    client: &CubeClient,
    state: &FilterState,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Option<contracts::analytics::response::Row>, ApiError> {
    let measures = kpi_defs().iter().map(|d| d.measure.to_string()).collect();
    // The overview manages its own period; a globally selected Sales.date
    // range is replaced, everything else passes through.
    let mut query = build_query(state, &[DIM_DATE]).into_query(measures, vec![]);
    query.time_dimensions.push(TimeDimension {
        dimension: DIM_DATE.to_string(),
        granularity: Granularity::Day,
        date_range: [from.to_string(), to.to_string()],
    });

    let response = client.load(&query).await?;
    Ok(response.data.into_iter().next())
}

fn status_for(value: f64, target: f64) -> KpiStatus {
    if target <= 0.0 {
        return KpiStatus::Neutral;
    }
    let attainment = value / target * 100.0;
    if attainment >= 100.0 {
        KpiStatus::Good
    } else if attainment >= 80.0 {
        KpiStatus::Warning
    } else {
        KpiStatus::Bad
    }
}

fn trend_for(value: f64, previous: Option<f64>) -> Trend {
    match previous {
        Some(prev) if value > prev => Trend::Up,
        Some(prev) if value < prev => Trend::Down,
        _ => Trend::Flat,
    }
}

/// KPI cards for the period, with the directly preceding period of the
/// same length as the comparison baseline.
pub async fn load_kpis(
    client: &CubeClient,
    state: &FilterState,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<KpiMetric>, ApiError> {
    let span = to - from;
    let prev_to = from - Duration::days(1);
    let prev_from = prev_to - span;

    let current = load_totals(client, state, from, to).await?;
    let previous = load_totals(client, state, prev_from, prev_to).await?;

    let kpis = kpi_defs()
        .into_iter()
        .map(|def| {
            let value = current
                .as_ref()
                .and_then(|row| ResultSet::number(row, def.measure))
                .unwrap_or(0.0);
            let previous_value = previous
                .as_ref()
                .and_then(|row| ResultSet::number(row, def.measure));
            KpiMetric {
                id: def.id.to_string(),
                label: def.label.to_string(),
                value,
                previous_value,
                target: def.target,
                format: def.format,
                trend: trend_for(value, previous_value),
                status: status_for(value, def.target),
            }
        })
        .collect();
    Ok(kpis)
}
