use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous/next controls with "Mostrando a-b de n"
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    /// `(first, last, total)` of the visible rows
    #[prop(into)]
    range: Signal<(usize, usize, usize)>,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <span class="pagination-range">
                {move || {
                    let (first, last, total) = range.get();
                    format!("Mostrando {}-{} de {}", first, last, total)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=move || current_page.get() <= 1
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("Página {} de {}", current_page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=move || current_page.get() >= total_pages.get()
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
