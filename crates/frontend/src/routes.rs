use crate::dashboards::{OverviewDashboard, SupplierIncomeDashboard, WarehouseStockDashboard};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Overview,
    SupplierIncome,
    WarehouseStock,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Overview => "Сводка",
            Page::SupplierIncome => "Поставки",
            Page::WarehouseStock => "Склады",
        }
    }
}

/// Client-side page switching. Dashboards stay mounted only while active,
/// so their subscriptions and live feeds tear down on switch.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let active = RwSignal::new(Page::Overview);

    let nav = move || {
        [Page::Overview, Page::SupplierIncome, Page::WarehouseStock]
            .into_iter()
            .map(|page| {
                let cls = move || {
                    if active.get() == page {
                        "nav__item nav__item--active"
                    } else {
                        "nav__item"
                    }
                };
                view! {
                    <button class=cls on:click=move |_| active.set(page)>
                        {page.title()}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-header__brand">"WB Аналитика"</span>
                <nav class="app-header__nav">{nav}</nav>
            </header>
            <main class="app-main">
                {move || match active.get() {
                    Page::Overview => view! { <OverviewDashboard /> }.into_any(),
                    Page::SupplierIncome => view! { <SupplierIncomeDashboard /> }.into_any(),
                    Page::WarehouseStock => view! { <WarehouseStockDashboard /> }.into_any(),
                }}
            </main>
        </div>
    }
}
