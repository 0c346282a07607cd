//! TopHeader: sidebar toggle, current user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let session = auth.session;

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| {
        auth.sign_out();
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_name = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.full_name())
                .unwrap_or_else(|| "Invitado".to_string())
        })
    };
    let role_label = move || session.with(|s| s.role().map(|r| r.label()).unwrap_or_default());

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Gestión Comercial"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__user-name">{user_name}</span>
                    <span class="top-header__user-role">{role_label}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
