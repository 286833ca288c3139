pub mod dashboard;

pub use dashboard::WarehouseStockDashboard;
