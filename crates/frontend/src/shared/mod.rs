pub mod api;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod live;
pub mod notify;
pub mod query;
pub mod state;
pub mod storage;
