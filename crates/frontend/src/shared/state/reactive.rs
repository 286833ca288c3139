//! Bridges from the explicit stores into Leptos signals.
//!
//! The stores themselves are framework-free; a view that wants to react to
//! them mirrors a snapshot into a signal. The store subscription is parked
//! in arena-local storage so it lives exactly as long as the owning
//! component and deregisters on teardown.

use super::{FilterState, FilterStore, OperationalState, OperationalStore};
use leptos::prelude::*;

/// Reactive snapshot of the global filter selection.
pub fn filter_signal(store: &FilterStore) -> RwSignal<FilterState> {
    let signal = RwSignal::new(store.state());
    let subscription = store.subscribe(move |state| signal.set(state.clone()));
    StoredValue::new_local(subscription);
    signal
}

/// Reactive snapshot of the alerts/KPIs cache.
pub fn operational_signal(store: &OperationalStore) -> RwSignal<OperationalState> {
    let signal = RwSignal::new(store.state());
    let subscription = store.subscribe(move |state| signal.set(state.clone()));
    StoredValue::new_local(subscription);
    signal
}
