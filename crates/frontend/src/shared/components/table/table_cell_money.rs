//! Table cell for amounts
//!
//! ```rust,ignore
//! <TableCellMoney value=Signal::derive(move || Some(total)) />
//! <TableCellMoney value=Signal::derive(move || Some(total)) show_currency=true bold=true />
//! ```

use super::number_format::{format_amount, format_money};
use leptos::prelude::*;
use thaw::*;

/// Right-aligned amount with two decimals and grouped thousands
#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,
    /// Prefix with the currency symbol
    #[prop(optional, default = false)]
    show_currency: bool,
    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) if show_currency => format_money(v),
        Some(v) => format_amount(v),
        None => "—".to_string(),
    };

    view! {
        <TableCell class="text-right">
            <span style=if bold { "font-weight: 600" } else { "" }>
                {formatted_text}
            </span>
        </TableCell>
    }
}
