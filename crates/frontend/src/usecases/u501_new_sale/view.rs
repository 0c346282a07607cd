use super::gateway::{sale_item, search_catalog, SalesGateway};
use crate::dashboards::d400_overview::counts::use_counts;
use crate::domain::a002_product::api as product_api;
use crate::domain::a002_product::ui::list::stock_badge;
use crate::domain::a003_client::api as client_api;
use crate::shared::components::composer_panels::{edit_cart, CartTable, CommittedPanel};
use crate::shared::components::table::format_money;
use crate::shared::composer::{commit, refresh_next_number, ComposerState, TransactionKind};
use crate::shared::confirm::confirm_action;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a003_client::aggregate::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn NewSaleView() -> impl IntoView {
    let auth = use_auth();
    let counts = use_counts();

    let state = RwSignal::new(ComposerState::<Client>::new(TransactionKind::Sale));
    let (clients, set_clients) = signal(Vec::<Client>::new());
    let (products, set_products) = signal(Vec::<Product>::new());
    let search = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);

    let report = Callback::new(move |msg: String| set_error.set(Some(msg)));

    let seller = auth
        .session
        .with_untracked(|s| s.user.as_ref().map(|u| u.full_name()));
    state.update(|s| s.set_seller(seller));

    let load_catalog = move || {
        let client = auth.client();
        spawn_local(async move {
            match product_api::fetch_products(&client).await {
                Ok(list) => set_products.set(list),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
        });
    };

    let refresh_number = move || {
        let gateway = SalesGateway::new(auth.client());
        spawn_local(async move {
            if let Err(e) = refresh_next_number(&state, &gateway).await {
                log::warn!("next sale number not loaded: {}", e);
            }
        });
    };

    {
        let client = auth.client();
        spawn_local(async move {
            match client_api::fetch_clients(&client).await {
                Ok(list) => set_clients.set(list),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
        });
    }
    load_catalog();
    refresh_number();

    let select_client = move |raw: String| {
        let chosen = raw.parse::<i64>().ok().and_then(|id| {
            clients.with_untracked(|list| list.iter().find(|c| c.id == id).cloned())
        });
        if let Some(Err(e)) = state.try_update(|s| s.select_counterparty(chosen)) {
            set_error.set(Some(e.user_message()));
        }
    };

    let finalize = move |_| {
        set_error.set(None);
        if let Err(e) = state.with_untracked(|s| s.validate()) {
            set_error.set(Some(e.user_message()));
            return;
        }
        let total = state.with_untracked(|s| s.total());
        if !confirm_action(&format!("¿Registrar la venta por {}?", format_money(total))) {
            return;
        }
        let gateway = SalesGateway::new(auth.client());
        spawn_local(async move {
            match commit(&state, &gateway).await {
                Ok(_) => {
                    // Stock changed on the server
                    load_catalog();
                    counts.refresh(auth);
                }
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
        });
    };

    let start_new = Callback::new(move |_: ()| {
        state.update(|s| s.start_new());
        set_error.set(None);
        search.set(String::new());
    });

    let catalog_rows = move || {
        let query = search.get();
        let locked = state.with(|s| s.is_locked());
        products.with(|list| {
            search_catalog(list, &query)
                .into_iter()
                .map(|product| {
                    let item = sale_item(product);
                    let id = item.id;
                    let stock = item.stock.unwrap_or(0);
                    let in_cart = state.with(|s| s.cart().quantity_of(id));
                    let (color, text) = stock_badge(stock);
                    let price = format_money(item.unit_price);
                    let unit = product.unit_type_name().to_string();
                    let name = item.name.clone();
                    view! {
                        <TableRow>
                            <TableCell>
                                <TableCellLayout truncate=true>{name}</TableCellLayout>
                            </TableCell>
                            <TableCell>{unit}</TableCell>
                            <TableCell class="text-right">{price}</TableCell>
                            <TableCell>
                                <Badge appearance=BadgeAppearance::Tint color=color>{text}</Badge>
                            </TableCell>
                            <TableCell>
                                <button
                                    class="button button--icon"
                                    title="Agregar"
                                    disabled={locked || stock == 0 || in_cart >= stock}
                                    on:click=move |_| edit_cart(state, report, |c| c.add_line(&item))
                                >
                                    {icon("plus")}
                                </button>
                            </TableCell>
                        </TableRow>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <PageFrame page_id="u501_new_sale--usecase" category=PAGE_CAT_USECASE>
            <PageHeader title="Nueva venta">
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || {
                        state
                            .with(|s| s.next_number().map(|n| format!("Orden N° {}", n)))
                            .unwrap_or_else(|| "Orden N° —".to_string())
                    }}
                </Badge>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_catalog()>
                    "Actualizar catálogo"
                </Button>
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
                        <label class="form__label">"Cliente"</label>
                        <select
                            class="form__select"
                            disabled=move || state.with(|s| s.is_locked())
                            prop:value=move || {
                                state
                                    .with(|s| s.counterparty().map(|c| c.id.to_string()))
                                    .unwrap_or_default()
                            }
                            on:change=move |ev| select_client(event_target_value(&ev))
                        >
                            <option value="">"Seleccione un cliente"</option>
                            {move || clients.get().into_iter().map(|c| {
                                let label = c.display_name();
                                view! { <option value=c.id.to_string()>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>

                    <SearchInput
                        value=search
                        on_change=Callback::new(move |text: String| search.set(text))
                        placeholder="Buscar por nombre o unidad..."
                    />

                    <div class="table-wrapper">
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell min_width=200.0>"Producto"</TableHeaderCell>
                                    <TableHeaderCell min_width=90.0>"Unidad"</TableHeaderCell>
                                    <TableHeaderCell min_width=100.0>"Precio"</TableHeaderCell>
                                    <TableHeaderCell min_width=80.0>"Stock"</TableHeaderCell>
                                    <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>{catalog_rows}</TableBody>
                        </Table>
                    </div>
                </div>

                <div class="composer__cart">
                    <h3 class="composer__title">"Detalle de la venta"</h3>
                    <CartTable state=state on_error=report />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=finalize
                        disabled=Signal::derive(move || {
                            state.with(|s| s.is_locked() || s.cart().is_empty())
                        })
                    >
                        "Finalizar venta"
                    </Button>
                </div>
            </div>
        </PageFrame>
    }
}
