pub mod filter_store;
pub mod operational_store;
pub mod reactive;
pub mod store;

pub use filter_store::{FilterState, FilterStore};
pub use operational_store::{OperationalState, OperationalStore};
pub use reactive::{filter_signal, operational_signal};
pub use store::{Store, Subscription};
