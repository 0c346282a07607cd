/// Search and sort helpers shared by the catalog lists
use leptos::prelude::*;
use std::cmp::Ordering;

/// Types that can be matched by the list search box
pub trait Searchable {
    /// `filter` is already lowercased and trimmed
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Types that can be sorted by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive contains
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_filter(&needle))
        .cloned()
        .collect()
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Arrow shown next to a sortable column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Search box with a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    view! {
        <div class="search-input">
            {crate::shared::icons::icon("search")}
            <input
                type="text"
                placeholder=placeholder
                class:search-input--active=move || !value.get().trim().is_empty()
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=move || !value.get().is_empty()>
                <button
                    class="search-input__clear"
                    on:click=move |_| on_change.run(String::new())
                    title="Limpiar"
                >
                    {crate::shared::icons::icon("close")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        name: &'static str,
        stock: i64,
    }

    impl Searchable for Item {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.name, filter)
        }
    }

    impl Sortable for Item {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "stock" => self.stock.cmp(&other.stock),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Tornillo", stock: 300 },
            Item { name: "Alicate", stock: 4 },
            Item { name: "Tuerca", stock: 120 },
        ]
    }

    #[test]
    fn test_filter_list_is_case_insensitive() {
        let found = filter_list(&items(), "  TOR ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tornillo");
        assert_eq!(filter_list(&items(), "").len(), 3);
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut list = items();
        sort_list(&mut list, "stock", true);
        assert_eq!(list[0].name, "Alicate");
        sort_list(&mut list, "name", false);
        assert_eq!(list[0].name, "Tuerca");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "stock", true), " ⇅");
    }
}
