use crate::domain::a002_supplier::ui::list::SupplierList;
use crate::domain::a003_product::ui::list::ProductList;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Top-level screens. Only one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Products,
    Suppliers,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Products => "Productos",
            Screen::Suppliers => "Proveedores",
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            Screen::Products => "products",
            Screen::Suppliers => "suppliers",
        }
    }
}

#[component]
fn NavTab(screen: Screen, active: RwSignal<Screen>) -> impl IntoView {
    view! {
        <button
            class=move || if active.get() == screen { "nav-tab active" } else { "nav-tab" }
            on:click=move |_| active.set(screen)
        >
            {icon(screen.icon_name())}
            {screen.label()}
        </button>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let active = RwSignal::new(Screen::Products);

    view! {
        <ConfigProvider>
            <div class="app">
                <header class="app-header">
                    <h1>"Sistema de Inventario - Farmacia"</h1>
                    <nav class="app-nav">
                        <NavTab screen=Screen::Products active=active />
                        <NavTab screen=Screen::Suppliers active=active />
                    </nav>
                </header>

                <main class="app-main">
                    {move || match active.get() {
                        Screen::Products => view! { <ProductList /> }.into_any(),
                        Screen::Suppliers => view! { <SupplierList /> }.into_any(),
                    }}
                </main>

                <footer class="app-footer">
                    <p>"© 2026 Sistema de Gestión de Inventario para Farmacia"</p>
                </footer>
            </div>
        </ConfigProvider>
    }
}
