use crate::routes::AppRoutes;
use crate::shared::api::CubeClient;
use crate::shared::notify::{ToastHost, ToastService};
use crate::shared::state::{FilterStore, OperationalStore};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Shared services for the whole app, provided via context instead of
    // module-level singletons.
    provide_context(FilterStore::load());
    provide_context(OperationalStore::new());
    provide_context(CubeClient::from_env());
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
        <ToastHost />
    }
}
