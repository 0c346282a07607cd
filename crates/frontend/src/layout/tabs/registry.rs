//! Tab content registry: the one place mapping tab.key → View.
//!
//! Every tab is wrapped in a role gate, so a key opened from the URL or a
//! stale link still renders the access-denied view for the wrong role.

use crate::dashboards::d400_overview::ui::OverviewDashboard;
use crate::domain::a002_product::ui::{ProductDetails, ProductList};
use crate::domain::a003_client::ui::{ClientDetails, ClientList};
use crate::domain::a004_provider::ui::{ProviderDetails, ProviderList};
use crate::domain::a005_sale::ui::{SaleDetail, SaleList};
use crate::domain::a006_purchase::ui::{PurchaseDetail, PurchaseList};
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::access::required_roles_for;
use crate::system::auth::guard::RequireRoles;
use crate::system::users::ui::list::UsersListPage;
use crate::usecases::u501_new_sale::NewSaleView;
use crate::usecases::u502_new_purchase::NewPurchaseView;
use leptos::prelude::*;

/// Numeric id after `prefix`, if `key` has that shape
fn detail_id(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix).and_then(|id| id.parse().ok())
}

/// Render the content of tab `key`, gated by the roles allowed to see it
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_content = key.to_string();
    view! {
        <RequireRoles roles=required_roles_for(key)>
            {render_allowed(&key_for_content, tabs_store)}
        </RequireRoles>
    }
    .into_any()
}

fn render_allowed(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        "d400_overview" => view! { <OverviewDashboard /> }.into_any(),

        // a002: Products
        "a002_product" => view! { <ProductList /> }.into_any(),
        "a002_product_new" => {
            view! { <ProductDetails id=None on_saved=close on_cancel=close /> }.into_any()
        }
        k if detail_id(k, "a002_product_detail_").is_some() => {
            let id = detail_id(k, "a002_product_detail_");
            view! { <ProductDetails id=id on_saved=close on_cancel=close /> }.into_any()
        }

        // a003: Clients
        "a003_client" => view! { <ClientList /> }.into_any(),
        "a003_client_new" => {
            view! { <ClientDetails id=None on_saved=close on_cancel=close /> }.into_any()
        }
        k if detail_id(k, "a003_client_detail_").is_some() => {
            let id = detail_id(k, "a003_client_detail_");
            view! { <ClientDetails id=id on_saved=close on_cancel=close /> }.into_any()
        }

        // a004: Providers
        "a004_provider" => view! { <ProviderList /> }.into_any(),
        "a004_provider_new" => {
            view! { <ProviderDetails id=None on_saved=close on_cancel=close /> }.into_any()
        }
        k if detail_id(k, "a004_provider_detail_").is_some() => {
            let id = detail_id(k, "a004_provider_detail_");
            view! { <ProviderDetails id=id on_saved=close on_cancel=close /> }.into_any()
        }

        // a005/a006: History
        "a005_sale" => view! { <SaleList /> }.into_any(),
        k if detail_id(k, "a005_sale_detail_").is_some() => {
            let id = detail_id(k, "a005_sale_detail_").unwrap_or_default();
            view! { <SaleDetail id=id on_close=close /> }.into_any()
        }
        "a006_purchase" => view! { <PurchaseList /> }.into_any(),
        k if detail_id(k, "a006_purchase_detail_").is_some() => {
            let id = detail_id(k, "a006_purchase_detail_").unwrap_or_default();
            view! { <PurchaseDetail id=id on_close=close /> }.into_any()
        }

        // Use cases
        "u501_new_sale" => view! { <NewSaleView /> }.into_any(),
        "u502_new_purchase" => view! { <NewPurchaseView /> }.into_any(),

        // System
        "sys_users" => view! { <UsersListPage /> }.into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">"Sección no encontrada"</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_id() {
        assert_eq!(detail_id("a005_sale_detail_42", "a005_sale_detail_"), Some(42));
        assert_eq!(detail_id("a005_sale_detail_x", "a005_sale_detail_"), None);
        assert_eq!(detail_id("a005_sale", "a005_sale_detail_"), None);
    }
}
