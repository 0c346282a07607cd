use crate::dashboards::d400_overview::counts::{use_counts, CountKind};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_naive_date;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::access::{guard_route, required_roles_for, RouteDecision};
use crate::system::auth::context::use_auth;
use leptos::prelude::*;
use thaw::*;

/// Tab opened by clicking a card
fn tab_for(kind: CountKind) -> &'static str {
    match kind {
        CountKind::Products => "a002_product",
        CountKind::Providers => "a004_provider",
        CountKind::Clients => "a003_client",
        CountKind::Sales => "a005_sale",
    }
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let counts = use_counts();
    let session = auth.session;

    let greeting = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|u| format!("Bienvenido, {}", u.given_name))
                .unwrap_or_default()
        })
    };
    let today = format_naive_date(chrono::Local::now().date_naive());

    let can_open = move |key: &str| {
        session.with(|s| guard_route(required_roles_for(key), s) == RouteDecision::Allow)
    };

    let open = move |key: &'static str| {
        ctx.open_tab(key, &tab_label_for_key(key));
    };

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Inicio" subtitle=today>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| counts.refresh(auth)
                    disabled=Signal::derive(move || counts.loading.get())
                >
                    "Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <p class="overview__greeting">{greeting}</p>

                <div class="overview__cards">
                    {CountKind::ALL.iter().copied().map(|kind| {
                        let key = tab_for(kind);
                        let on_click = can_open(key).then(|| Callback::new(move |_: ()| open(key)));
                        view! {
                            <StatCard
                                label=kind.label()
                                icon_name=kind.icon()
                                value=Signal::derive(move || counts.counts.with(|c| c.get(kind)))
                                loading=counts.loading
                                on_click=on_click
                            />
                        }
                    }).collect_view()}
                </div>

                <div class="overview__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open("u501_new_sale")>
                        {icon("plus")}
                        " Nueva venta"
                    </Button>
                    <Show when=move || can_open("u502_new_purchase")>
                        <Button on_click=move |_| open("u502_new_purchase")>
                            {icon("plus")}
                            " Nueva compra"
                        </Button>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_open_their_lists() {
        assert_eq!(tab_for(CountKind::Clients), "a003_client");
        assert_eq!(tab_for(CountKind::Sales), "a005_sale");
    }
}
