pub mod d420_overview;
pub mod d421_supplier_income;
pub mod d422_warehouse_stock;

pub use d420_overview::ui::OverviewDashboard;
pub use d421_supplier_income::ui::SupplierIncomeDashboard;
pub use d422_warehouse_stock::ui::WarehouseStockDashboard;
