use serde::{Deserialize, Serialize};

pub use crate::alerts::Trend;

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    Money { currency: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual status of the KPI card (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiStatus {
    Good,
    Warning,
    Bad,
    Neutral,
}

/// One KPI card: current value against target and previous period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub id: String,
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub previous_value: Option<f64>,
    /// Plan value the health score measures against.
    pub target: f64,
    pub format: ValueFormat,
    pub trend: Trend,
    pub status: KpiStatus,
}

impl KpiMetric {
    /// Change relative to the previous period, as a percentage.
    pub fn change_percent(&self) -> Option<f64> {
        let prev = self.previous_value?;
        if prev == 0.0 {
            return None;
        }
        Some((self.value - prev) / prev.abs() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: f64, previous: Option<f64>) -> KpiMetric {
        KpiMetric {
            id: "revenue".to_string(),
            label: "Выручка".to_string(),
            value,
            previous_value: previous,
            target: 100.0,
            format: ValueFormat::Money {
                currency: "₽".to_string(),
            },
            trend: Trend::Up,
            status: KpiStatus::Good,
        }
    }

    #[test]
    fn test_change_percent() {
        assert_eq!(metric(120.0, Some(100.0)).change_percent(), Some(20.0));
        assert_eq!(metric(80.0, Some(100.0)).change_percent(), Some(-20.0));
        assert_eq!(metric(80.0, None).change_percent(), None);
        assert_eq!(metric(80.0, Some(0.0)).change_percent(), None);
    }
}
