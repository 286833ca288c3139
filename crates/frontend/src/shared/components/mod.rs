pub mod alert_panel;
pub mod filter_panel;
pub mod number_format;
pub mod stat_card;
