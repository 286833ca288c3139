pub mod dashboard;

pub use dashboard::SupplierIncomeDashboard;
