//! Cart table and committed-order panel shared by the new sale and new
//! purchase screens, plus the signal holder the commit flow runs against.

use crate::shared::components::table::{format_money, TableCellMoney};
use crate::shared::composer::{
    Cart, ComposerCell, ComposerState, Counterparty, OrderSummary, TransactionKind,
};
use crate::shared::date_utils::format_naive_date;
use crate::shared::document::download_order_document;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Screens keep the composer in a signal; a disposed signal means the tab closed
impl<C> ComposerCell<C> for RwSignal<ComposerState<C>>
where
    C: Counterparty + Send + Sync + 'static,
{
    fn with_state<R>(&self, f: impl FnOnce(&mut ComposerState<C>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Apply `f` to the cart; a locked composer reports through `on_error`
pub fn edit_cart<C>(
    state: RwSignal<ComposerState<C>>,
    on_error: Callback<String>,
    f: impl FnOnce(&mut Cart) -> bool,
) where
    C: Counterparty + Send + Sync + 'static,
{
    match state.try_update(|s| s.edit_cart(f)) {
        Some(Ok(false)) => log::debug!("cart unchanged"),
        Some(Err(e)) => on_error.run(e.user_message()),
        _ => {}
    }
}

#[component]
pub fn CartTable<C>(
    state: RwSignal<ComposerState<C>>,
    /// Purchases negotiate the unit price per line
    #[prop(optional)]
    editable_price: bool,
    on_error: Callback<String>,
) -> impl IntoView
where
    C: Counterparty + Send + Sync + 'static,
{
    let rows = move || {
        let locked = state.with(|s| s.is_locked());
        state
            .with(|s| s.cart().lines().to_vec())
            .into_iter()
            .map(|line| {
                let id = line.item_id;
                let qty = line.quantity;
                let line_total = line.line_total();
                let at_cap = line.stock_limit.is_some_and(|cap| qty >= cap);
                let price_cell = if editable_price {
                    view! {
                        <TableCell>
                            <input
                                type="number"
                                class="form__input cart__price-input"
                                min="0"
                                step="0.01"
                                prop:value=line.unit_price.to_string()
                                disabled=locked
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    match raw.trim().parse::<f64>() {
                                        Ok(price) => edit_cart(state, on_error, move |c| c.set_unit_price(id, price)),
                                        Err(_) => on_error.run("Precio inválido".to_string()),
                                    }
                                }
                            />
                        </TableCell>
                    }
                    .into_any()
                } else {
                    let price = line.unit_price;
                    view! { <TableCellMoney value=Signal::derive(move || Some(price)) /> }.into_any()
                };
                view! {
                    <TableRow>
                        <TableCell>
                            <TableCellLayout truncate=true>{line.name.clone()}</TableCellLayout>
                        </TableCell>
                        <TableCell>
                            <div class="cart__qty">
                                <button
                                    class="button button--icon"
                                    disabled=locked
                                    on:click=move |_| edit_cart(state, on_error, move |c| c.decrement(id))
                                >
                                    {icon("minus")}
                                </button>
                                <input
                                    type="number"
                                    class="form__input cart__qty-input"
                                    min="0"
                                    prop:value=qty.to_string()
                                    disabled=locked
                                    on:change=move |ev| {
                                        let raw = event_target_value(&ev);
                                        edit_cart(state, on_error, move |c| c.set_quantity_input(id, &raw));
                                    }
                                />
                                <button
                                    class="button button--icon"
                                    disabled={locked || at_cap}
                                    on:click=move |_| {
                                        edit_cart(state, on_error, move |c| c.set_quantity(id, i64::from(qty) + 1))
                                    }
                                >
                                    {icon("plus")}
                                </button>
                            </div>
                        </TableCell>
                        {price_cell}
                        <TableCellMoney value=Signal::derive(move || Some(line_total)) bold=true />
                        <TableCell>
                            <button
                                class="button button--icon button--danger"
                                title="Quitar"
                                disabled=locked
                                on:click=move |_| edit_cart(state, on_error, move |c| c.remove_line(id))
                            >
                                {icon("trash")}
                            </button>
                        </TableCell>
                    </TableRow>
                }
            })
            .collect_view()
    };

    view! {
        <div class="cart">
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=200.0>"Producto"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Precio unit."</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Subtotal"</TableHeaderCell>
                        <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>{rows}</TableBody>
            </Table>
            <Show when=move || state.with(|s| s.cart().is_empty())>
                <div class="table__empty">"Agregue productos desde el catálogo"</div>
            </Show>
            <div class="cart__total">
                "Total: "
                <strong>{move || format_money(state.with(|s| s.total()))}</strong>
            </div>
        </div>
    }
}

/// Shown after a successful commit: the order is final, the only actions are
/// downloading its document and starting over.
#[component]
pub fn CommittedPanel(
    #[prop(into)] summary: Signal<Option<OrderSummary>>,
    on_new: Callback<()>,
    on_error: Callback<String>,
) -> impl IntoView {
    move || {
        summary.get().map(|committed| {
            let new_label = match committed.kind {
                TransactionKind::Sale => "Nueva venta",
                TransactionKind::Purchase => "Nueva compra",
            };
            let for_download = committed.clone();
            view! {
                <div class="warning-box warning-box--success committed-panel">
                    <span class="warning-box__text">
                        {committed.kind.title()}
                        " N° "
                        <strong>{committed.order_number.clone()}</strong>
                        " registrada el "
                        {format_naive_date(committed.date)}
                        " · "
                        {committed.counterparty.name.clone()}
                        " · Total "
                        {format_money(committed.grand_total)}
                    </span>
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                if let Err(e) = download_order_document(&for_download) {
                                    on_error.run(e);
                                }
                            }
                        >
                            {icon("download")}
                            " Descargar documento"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_new.run(())>
                            {icon("plus")}
                            " "
                            {new_label}
                        </Button>
                    </Flex>
                </div>
            }
        })
    }
}
