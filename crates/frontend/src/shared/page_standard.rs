//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a005_sale--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable from the DOM inspector.

/// Record table with filters/pagination
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Overview cards
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Operation screens (new sale, new purchase)
pub const PAGE_CAT_USECASE: &str = "usecase";

/// System administration page
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_USECASE,
    PAGE_CAT_SYSTEM,
];

/// `{entity}--{category}` with a known category
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a005_sale--list"));
        assert!(is_valid_page_id("u501_new_sale--usecase"));
        assert!(!is_valid_page_id("a005_sale"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a005_sale--grid"));
    }
}
