use super::gateway::{purchase_item, PurchasesGateway};
use crate::domain::a002_product::api as product_api;
use crate::domain::a004_provider::api as provider_api;
use crate::shared::components::composer_panels::{edit_cart, CartTable, CommittedPanel};
use crate::shared::components::table::format_money;
use crate::shared::composer::{commit, refresh_next_number, ComposerState, TransactionKind};
use crate::shared::confirm::confirm_action;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a004_provider::aggregate::Provider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn NewPurchaseView() -> impl IntoView {
    let auth = use_auth();

    let state = RwSignal::new(ComposerState::<Provider>::new(TransactionKind::Purchase));
    let (providers, set_providers) = signal(Vec::<Provider>::new());
    let (catalog, set_catalog) = signal(Vec::<Product>::new());
    let (catalog_loading, set_catalog_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let report = Callback::new(move |msg: String| set_error.set(Some(msg)));

    {
        let client = auth.client();
        spawn_local(async move {
            match provider_api::fetch_providers(&client).await {
                Ok(list) => set_providers.set(list),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
        });
    }
    {
        let gateway = PurchasesGateway::new(auth.client());
        spawn_local(async move {
            if let Err(e) = refresh_next_number(&state, &gateway).await {
                log::warn!("next purchase number not loaded: {}", e);
            }
        });
    }

    let load_catalog = move |provider_id: i64| {
        set_catalog_loading.set(true);
        let client = auth.client();
        spawn_local(async move {
            match product_api::fetch_products_by_provider(&client, provider_id).await {
                Ok(list) => set_catalog.set(list),
                Err(e) => {
                    set_catalog.set(Vec::new());
                    set_error.set(Some(auth.report(&e)));
                }
            }
            set_catalog_loading.set(false);
        });
    };

    // The catalog belongs to one provider, so switching provider empties the cart
    let select_provider = move |raw: String| {
        let chosen = raw.parse::<i64>().ok().and_then(|id| {
            providers.with_untracked(|list| list.iter().find(|p| p.id == id).cloned())
        });
        let chosen_id = chosen.as_ref().map(|p| p.id);
        let changed = state.try_update(|s| {
            s.select_counterparty(chosen)?;
            s.edit_cart(|c| c.clear())
        });
        match changed {
            Some(Ok(())) => match chosen_id {
                Some(id) => load_catalog(id),
                None => set_catalog.set(Vec::new()),
            },
            Some(Err(e)) => set_error.set(Some(e.user_message())),
            None => {}
        }
    };

    let finalize = move |_| {
        set_error.set(None);
        if let Err(e) = state.with_untracked(|s| s.validate()) {
            set_error.set(Some(e.user_message()));
            return;
        }
        let total = state.with_untracked(|s| s.total());
        if !confirm_action(&format!("¿Registrar la compra por {}?", format_money(total))) {
            return;
        }
        let gateway = PurchasesGateway::new(auth.client());
        spawn_local(async move {
            if let Err(e) = commit(&state, &gateway).await {
                set_error.set(Some(auth.report(&e)));
            }
        });
    };

    let start_new = Callback::new(move |_: ()| {
        state.update(|s| s.start_new());
        set_catalog.set(Vec::new());
        set_error.set(None);
    });

    let catalog_rows = move || {
        let locked = state.with(|s| s.is_locked());
        catalog
            .get()
            .into_iter()
            .map(|product| {
                let item = purchase_item(&product);
                let in_cart = state.with(|s| s.cart().quantity_of(item.id));
                let stock = product.available_stock();
                let price = format_money(item.unit_price);
                let name = item.name.clone();
                view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout truncate=true>{name}</TableCellLayout>
                        </TableCell>
                        <TableCell>{product.unit_type_name().to_string()}</TableCell>
                        <TableCell class="text-right">{price}</TableCell>
                        <TableCell class="text-right">{stock.to_string()}</TableCell>
                        <TableCell class="text-right">
                            {if in_cart > 0 { in_cart.to_string() } else { String::new() }}
                        </TableCell>
                        <TableCell>
                            <button
                                class="button button--icon"
                                title="Agregar"
                                disabled=locked
                                on:click=move |_| edit_cart(state, report, |c| c.add_line(&item))
                            >
                                {icon("plus")}
                            </button>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
    };

    view! {
        <PageFrame page_id="u502_new_purchase--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Nueva compra">
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || {
                        state
                            .with(|s| s.next_number().map(|n| format!("Orden N° {}", n)))
                            .unwrap_or_else(|| "Orden N° —".to_string())
                    }}
                </Badge>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <CommittedPanel
                summary=Signal::derive(move || state.with(|s| s.committed().cloned()))
                on_new=start_new
                on_error=report
            />

            <div class="composer">
                <div class="composer__catalog">
                    <div class="form__group">
                        <label class="form__label">"Proveedor"</label>
                        <select
                            class="form__select"
                            disabled=move || state.with(|s| s.is_locked())
                            prop:value=move || {
                                state
                                    .with(|s| s.counterparty().map(|p| p.id.to_string()))
                                    .unwrap_or_default()
                            }
                            on:change=move |ev| select_provider(event_target_value(&ev))
                        >
                            <option value="">"Seleccione un proveedor"</option>
                            {move || providers.get().into_iter().map(|p| {
                                let label = p.name.clone();
                                view! { <option value=p.id.to_string()>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>

                    <Show
                        when=move || state.with(|s| s.counterparty().is_some())
                        fallback=|| view! {
                            <div class="table__empty">"Selecciona un proveedor para comenzar"</div>
                        }
                    >
                        <div class="table-wrapper">
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell min_width=200.0>"Producto"</TableHeaderCell>
                                        <TableHeaderCell min_width=90.0>"Unidad"</TableHeaderCell>
                                        <TableHeaderCell min_width=110.0>"Precio compra"</TableHeaderCell>
                                        <TableHeaderCell min_width=70.0>"Stock"</TableHeaderCell>
                                        <TableHeaderCell min_width=70.0>"En orden"</TableHeaderCell>
                                        <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>{catalog_rows}</TableBody>
                            </Table>
                            <Show when=move || !catalog_loading.get() && catalog.with(|c| c.is_empty())>
                                <div class="table__empty">"Este proveedor no tiene productos asignados"</div>
                            </Show>
                        </div>
                    </Show>
                </div>

                <div class="composer__cart">
                    <h3 class="composer__title">"Detalle de la compra"</h3>
                    <CartTable state=state editable_price=true on_error=report />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=finalize
                        disabled=Signal::derive(move || {
                            state.with(|s| s.is_locked() || s.cart().is_empty())
                        })
                    >
                        "Registrar compra"
                    </Button>
                </div>
            </div>
        </PageFrame>
    }
}
