pub mod alerts;
pub mod analytics;
pub mod kpi;
