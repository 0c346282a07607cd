use crate::shared::icons::icon;
use leptos::prelude::*;

/// Dashboard card with a single count
#[component]
pub fn StatCard(
    label: &'static str,
    icon_name: &'static str,
    /// `None` while loading or when the count could not be fetched
    #[prop(into)]
    value: Signal<Option<usize>>,
    #[prop(into)] loading: Signal<bool>,
    /// `None` renders a static card
    on_click: Option<Callback<()>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => v.to_string(),
        None if loading.get() => "…".to_string(),
        None => "—".to_string(),
    };

    view! {
        <div
            class="stat-card"
            class:stat-card--error=move || value.get().is_none() && !loading.get()
            class:stat-card--clickable=on_click.is_some()
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
            </div>
        </div>
    }
}
