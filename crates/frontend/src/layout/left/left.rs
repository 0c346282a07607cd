use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Collapsible left zone; the sidebar lives inside
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let is_open = move || tabs_store.left_open.get();

    view! {
        <aside data-zone="left" class="app-sidebar" class:app-sidebar--collapsed=move || !is_open()>
            <div class="app-sidebar__brand">
                <span class="app-sidebar__brand-title">"Gestión Comercial"</span>
            </div>
            {children()}
        </aside>
    }
}
