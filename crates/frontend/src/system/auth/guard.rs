use contracts::system::auth::Role;
use leptos::prelude::*;

use super::access::{guard_route, RouteDecision};
use super::context::use_session;
use crate::system::pages::login::LoginPage;

/// Loader shown while the identity is being resolved
#[component]
pub fn SessionLoading() -> impl IntoView {
    view! {
        <div class="session-loading">
            <div class="spinner"></div>
            <p>"Cargando..."</p>
        </div>
    }
}

#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <div class="access-denied">
            <h2>"Acceso Denegado"</h2>
            <p>"No tienes permisos para acceder a esta sección."</p>
        </div>
    }
}

/// Renders children only for actors whose role is in `roles`.
/// Without a session the login screen is shown instead.
#[component]
pub fn RequireRoles(
    #[prop(optional)] roles: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let decision = Memo::new(move |_| session.with(|s| guard_route(roles, s)));

    move || match decision.get() {
        RouteDecision::Pending => view! { <SessionLoading /> }.into_any(),
        RouteDecision::Redirect => view! { <LoginPage /> }.into_any(),
        RouteDecision::Deny => view! { <AccessDenied /> }.into_any(),
        RouteDecision::Allow => children().into_any(),
    }
}
