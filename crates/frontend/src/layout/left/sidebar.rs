//! Sidebar: navigation sections filtered by the actor's role, with count badges

use crate::dashboards::d400_overview::counts::{use_counts, CountKind, Counts};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::access::{filter_navigation, navigation_catalog, NavSection};
use crate::system::auth::context::use_session;
use leptos::prelude::*;

/// Count shown next to a navigation entry, if it has one
fn badge_for(key: &str, counts: &Counts) -> Option<usize> {
    match key {
        "a002_product" => counts.get(CountKind::Products),
        "a004_provider" => counts.get(CountKind::Providers),
        _ => None,
    }
}

fn with_badges(mut sections: Vec<NavSection>, counts: &Counts) -> Vec<NavSection> {
    for section in sections.iter_mut() {
        for entry in section.entries.iter_mut() {
            entry.badge = badge_for(entry.key, counts);
        }
    }
    sections
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();
    let counts = use_counts();

    let collapsed_sections = RwSignal::new(Vec::<&'static str>::new());

    let sections = Memo::new(move |_| {
        let catalog = navigation_catalog();
        let visible = session.with(|s| filter_navigation(&catalog, s.user.as_ref()));
        counts.counts.with(|c| with_badges(visible, c))
    });

    view! {
        <nav class="app-sidebar__content">
            {move || sections.get().into_iter().map(|section: NavSection| {
                    let section_id = section.id;
                    let is_expanded = move || !collapsed_sections.get().contains(&section_id);
                    let entries = StoredValue::new(section.entries.clone());
                    view! {
                        <div class="app-sidebar__section">
                            <div
                                class="app-sidebar__section-title"
                                on:click=move |_| {
                                    collapsed_sections.update(|ids| {
                                        if let Some(pos) = ids.iter().position(|x| *x == section_id) {
                                            ids.remove(pos);
                                        } else {
                                            ids.push(section_id);
                                        }
                                    });
                                }
                            >
                                <span>{section.label}</span>
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=is_expanded
                                >
                                    {icon("chevron-right")}
                                </div>
                            </div>
                            <Show when=is_expanded>
                                <div class="app-sidebar__children">
                                    {entries.get_value().into_iter().map(|entry| {
                                        let key = entry.key;
                                        let label = entry.label;
                                        view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || {
                                                    ctx.active.get().as_deref() == Some(key)
                                                }
                                                on:click=move |_| ctx.open_tab(key, label)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(entry.icon)}
                                                    <span>{label}</span>
                                                </div>
                                                {entry.badge.map(|n| view! {
                                                    <span class="app-sidebar__badge">{n}</span>
                                                })}
                                            </div>
                                        }
                                    }).collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badges_only_on_products_and_providers() {
        let counts = Counts {
            products: Some(12),
            providers: Some(3),
            clients: Some(40),
            sales: None,
        };
        let sections = with_badges(navigation_catalog(), &counts);
        let badges: Vec<(&str, Option<usize>)> = sections
            .iter()
            .flat_map(|s| s.entries.iter().map(|e| (e.key, e.badge)))
            .filter(|(_, b)| b.is_some())
            .collect();
        assert_eq!(badges, vec![("a002_product", Some(12)), ("a004_provider", Some(3))]);
    }

    #[test]
    fn test_missing_count_leaves_badge_empty() {
        let counts = Counts {
            products: None,
            ..Default::default()
        };
        assert_eq!(badge_for("a002_product", &counts), None);
    }
}
