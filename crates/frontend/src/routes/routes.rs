use crate::dashboards::d400_overview::counts::use_counts;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::TabPage;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireRoles;
use leptos::prelude::*;

/// Authenticated layout: sidebar and tabs.
///
/// Mounted once per signed-in session; unmounting (logout) drops every tab.
#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let auth = use_auth();
    let counts = use_counts();

    // Initialize router integration. This runs once when the component is created.
    tabs_store.init_router_integration();
    counts.refresh(auth);

    on_cleanup(move || {
        tabs_store.close_all();
        counts.clear();
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        }
                    />
                }
                .into_any()
            }
        />
    }
}

/// Loader while the stored token resolves, login without a session, shell otherwise
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireRoles>
            <MainLayout />
        </RequireRoles>
    }
}
