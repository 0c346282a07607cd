//! Sortable table header cell
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Stock"
//!     sort_field="stock"
//!     current_sort_field=Signal::derive(move || sort.get().0)
//!     sort_ascending=Signal::derive(move || sort.get().1)
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use crate::shared::list_utils::get_sort_indicator;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    sort_field: &'static str,
    #[prop(into)] current_sort_field: Signal<String>,
    #[prop(into)] sort_ascending: Signal<bool>,
    on_sort: Callback<&'static str>,
    #[prop(optional, default = 100.0)] min_width: f64,
) -> impl IntoView {
    let is_sorted = move || current_sort_field.get() == sort_field;

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                class:table__sortable-header--active=is_sorted
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(sort_field)
            >
                {label}
                <span class="table__sort-indicator">
                    {move || {
                        get_sort_indicator(&current_sort_field.get(), sort_field, sort_ascending.get())
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
