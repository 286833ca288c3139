use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert severity (drives colour and the critical counters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

/// Functional area the alert belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Sales,
    Stock,
    Advertising,
    Finance,
    System,
}

/// Direction of the metric behind an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Snapshot of the metric that tripped the alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub current: f64,
    pub threshold: f64,
    pub unit: String,
    pub trend: Trend,
}

/// Suggested follow-up action rendered as a button on the alert card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertAction {
    pub label: String,
    /// Stable key the frontend maps to a handler ("open_stocks", ...).
    pub action_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub metric: Option<MetricSnapshot>,
    #[serde(default)]
    pub actions: Vec<AlertAction>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    /// Articles / warehouses the alert refers to.
    #[serde(default)]
    pub affected_items: Vec<String>,
}

impl Alert {
    /// New unread alert with a client-generated id.
    pub fn new(
        severity: AlertSeverity,
        category: AlertCategory,
        title: &str,
        description: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            severity,
            category,
            title: title.to_string(),
            description: description.to_string(),
            metric: None,
            actions: Vec::new(),
            timestamp: Utc::now(),
            is_read: false,
            affected_items: Vec::new(),
        }
    }
}

/// Longer-lived issue tracked separately from the alert feed
/// (out-of-stock article, rejected card, paused campaign).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub severity: AlertSeverity,
    /// Short area tag ("stocks", "content", "ads").
    pub area: String,
    pub description: String,
    pub detected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_wire_format() {
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Critical).unwrap(),
            "\"critical\""
        );
        let back: AlertSeverity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(back, AlertSeverity::Warning);
    }

    #[test]
    fn test_new_alert_is_unread() {
        let alert = Alert::new(
            AlertSeverity::Info,
            AlertCategory::System,
            "Синхронизация",
            "Обновление данных завершено",
        );
        assert!(!alert.is_read);
        assert!(alert.metric.is_none());
        assert!(!alert.id.is_empty());
    }
}
