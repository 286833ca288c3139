use super::store::{Store, Subscription};
use contracts::alerts::{Alert, AlertSeverity, Problem};
use contracts::kpi::KpiMetric;
use std::collections::BTreeSet;

/// Client-side cache of alerts, KPIs and open problems plus the panel UI
/// state (muted/expanded ids, active severity filter).
#[derive(Debug, Clone, Default)]
pub struct OperationalState {
    pub alerts: Vec<Alert>,
    pub kpis: Vec<KpiMetric>,
    pub problems: Vec<Problem>,
    pub muted: BTreeSet<String>,
    pub expanded: BTreeSet<String>,
    pub severity_filter: Option<AlertSeverity>,
}

impl OperationalState {
    /// Alerts for the panel: severity filter applied, muted hidden,
    /// unread first, then newest first.
    pub fn filtered_alerts(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|a| !self.muted.contains(&a.id))
            .filter(|a| self.severity_filter.map_or(true, |sev| a.severity == sev))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| {
            a.is_read
                .cmp(&b.is_read)
                .then(b.timestamp.cmp(&a.timestamp))
        });
        alerts
    }

    /// Unread, unmuted critical alerts.
    pub fn critical_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| {
                a.severity == AlertSeverity::Critical
                    && !a.is_read
                    && !self.muted.contains(&a.id)
            })
            .count()
    }

    /// Mean target attainment across KPIs, each term capped at 100%.
    /// KPIs without a positive target are skipped; no measurable KPIs
    /// means 100.
    pub fn health_score(&self) -> u32 {
        let attainments: Vec<f64> = self
            .kpis
            .iter()
            .filter(|k| k.target > 0.0)
            .map(|k| (k.value / k.target * 100.0).min(100.0))
            .collect();
        if attainments.is_empty() {
            return 100;
        }
        let mean = attainments.iter().sum::<f64>() / attainments.len() as f64;
        mean.round() as u32
    }

    /// 100 minus fixed penalties per open critical alert and critical
    /// problem, clamped to [0, 100].
    pub fn performance_score(&self) -> u32 {
        let critical_alerts = self.critical_count() as i32;
        let critical_problems = self
            .problems
            .iter()
            .filter(|p| p.severity == AlertSeverity::Critical)
            .count() as i32;

        let score = 100
            - CRITICAL_ALERT_PENALTY * critical_alerts
            - CRITICAL_PROBLEM_PENALTY * critical_problems;
        score.clamp(0, 100) as u32
    }
}

/// Alerts/KPIs store. Mutators are direct, synchronous, last-write-wins;
/// derived getters recompute per call by linear scan, which is fine at the
/// tens-to-hundreds of items this panel holds.
#[derive(Clone, Default)]
pub struct OperationalStore {
    store: Store<OperationalState>,
}

const CRITICAL_ALERT_PENALTY: i32 = 5;
const CRITICAL_PROBLEM_PENALTY: i32 = 3;

impl OperationalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OperationalState {
        self.store.get_state()
    }

    pub fn with<R>(&self, f: impl FnOnce(&OperationalState) -> R) -> R {
        self.store.with(f)
    }

    #[must_use]
    pub fn subscribe(
        &self,
        listener: impl Fn(&OperationalState) + Send + Sync + 'static,
    ) -> Subscription<OperationalState> {
        self.store.subscribe(listener)
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    pub fn set_alerts(&self, alerts: Vec<Alert>) {
        self.store.update(|s| s.alerts = alerts);
    }

    pub fn push_alert(&self, alert: Alert) {
        self.store.update(|s| s.alerts.push(alert));
    }

    pub fn mark_read(&self, id: &str) {
        self.store.update(|s| {
            if let Some(alert) = s.alerts.iter_mut().find(|a| a.id == id) {
                alert.is_read = true;
            }
        });
    }

    pub fn mark_all_read(&self) {
        self.store.update(|s| {
            for alert in &mut s.alerts {
                alert.is_read = true;
            }
        });
    }

    pub fn dismiss(&self, id: &str) {
        self.store.update(|s| {
            s.alerts.retain(|a| a.id != id);
            s.muted.remove(id);
            s.expanded.remove(id);
        });
    }

    pub fn toggle_mute(&self, id: &str) {
        self.store.update(|s| {
            if !s.muted.remove(id) {
                s.muted.insert(id.to_string());
            }
        });
    }

    pub fn toggle_expanded(&self, id: &str) {
        self.store.update(|s| {
            if !s.expanded.remove(id) {
                s.expanded.insert(id.to_string());
            }
        });
    }

    pub fn set_severity_filter(&self, severity: Option<AlertSeverity>) {
        self.store.update(|s| s.severity_filter = severity);
    }

    pub fn set_kpis(&self, kpis: Vec<KpiMetric>) {
        self.store.update(|s| s.kpis = kpis);
    }

    pub fn set_problems(&self, problems: Vec<Problem>) {
        self.store.update(|s| s.problems = problems);
    }

    pub fn resolve_problem(&self, id: &str) {
        self.store.update(|s| s.problems.retain(|p| p.id != id));
    }

    // ------------------------------------------------------------------
    // Derived getters
    // ------------------------------------------------------------------

    pub fn filtered_alerts(&self) -> Vec<Alert> {
        self.with(OperationalState::filtered_alerts)
    }

    pub fn critical_count(&self) -> usize {
        self.with(OperationalState::critical_count)
    }

    pub fn health_score(&self) -> u32 {
        self.with(OperationalState::health_score)
    }

    pub fn performance_score(&self) -> u32 {
        self.with(OperationalState::performance_score)
    }
}
