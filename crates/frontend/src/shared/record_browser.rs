//! Record Browser: local filter + pagination over a fetched history.
//!
//! The full collection is fetched once; search text and the counterparty
//! filter compose with AND, and any filter change goes back to page 1.

use contracts::domain::common::TransactionRecord;

use super::error::AppError;

pub const PAGE_SIZE: usize = 15;

pub trait BrowsableRecord: Clone {
    fn order_number(&self) -> &str;
    fn counterparty_name(&self) -> &str;
    fn item_names(&self) -> Vec<&str>;
}

impl BrowsableRecord for TransactionRecord {
    fn order_number(&self) -> &str {
        &self.order_number
    }

    fn counterparty_name(&self) -> &str {
        &self.counterparty.name
    }

    fn item_names(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.product.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordBrowser<R> {
    all: Vec<R>,
    search: String,
    counterparty_filter: Option<String>,
    /// 1-based
    page: usize,
    page_size: usize,
    error: Option<String>,
    loaded: bool,
}

impl<R: BrowsableRecord> Default for RecordBrowser<R> {
    fn default() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }
}

impl<R: BrowsableRecord> RecordBrowser<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            all: Vec::new(),
            search: String::new(),
            counterparty_filter: None,
            page: 1,
            page_size: page_size.max(1),
            error: None,
            loaded: false,
        }
    }

    /// Replace the collection with a fetch result.
    /// A failure empties the rows and keeps the message for this page only.
    pub fn load(&mut self, result: Result<Vec<R>, AppError>) {
        match result {
            Ok(rows) => {
                self.all = rows;
                self.error = None;
            }
            Err(e) => {
                log::error!("history load failed: {}", e);
                self.all.clear();
                self.error = Some(e.user_message());
            }
        }
        self.page = 1;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    pub fn counterparty_filter(&self) -> Option<&str> {
        self.counterparty_filter.as_deref()
    }

    /// `None` shows every counterparty
    pub fn set_counterparty_filter(&mut self, name: Option<String>) {
        self.counterparty_filter = name.filter(|n| !n.is_empty());
        self.page = 1;
    }

    fn matches(&self, record: &R, needle: &str) -> bool {
        if let Some(wanted) = &self.counterparty_filter {
            if record.counterparty_name() != wanted {
                return false;
            }
        }
        if needle.is_empty() {
            return true;
        }
        record.counterparty_name().to_lowercase().contains(needle)
            || record.order_number().to_lowercase().contains(needle)
            || record
                .item_names()
                .iter()
                .any(|n| n.to_lowercase().contains(needle))
    }

    pub fn filtered(&self) -> Vec<&R> {
        let needle = self.search.trim().to_lowercase();
        self.all.iter().filter(|r| self.matches(r, &needle)).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn total_count(&self) -> usize {
        self.all.len()
    }

    /// Never less than 1, even for an empty result
    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size).max(1)
    }

    pub fn page(&self) -> usize {
        self.page.clamp(1, self.page_count())
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page().saturating_sub(1));
    }

    pub fn page_rows(&self) -> Vec<R> {
        let start = (self.page() - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect()
    }

    /// `(first, last, total)` of the visible rows, 1-based; `(0, 0, 0)` when empty
    pub fn visible_range(&self) -> (usize, usize, usize) {
        let total = self.filtered_count();
        if total == 0 {
            return (0, 0, 0);
        }
        let first = (self.page() - 1) * self.page_size + 1;
        let last = (first + self.page_size - 1).min(total);
        (first, last, total)
    }

    /// Distinct counterparty names in first-seen order
    pub fn counterparty_options(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.all {
            let name = record.counterparty_name();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// The whole collection, regardless of filters and page
    pub fn export_rows(&self) -> &[R] {
        &self.all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{CounterpartyRef, DetailLine, ProductRef};

    fn record(id: i64, client: &str, product: &str) -> TransactionRecord {
        TransactionRecord {
            id,
            order_number: format!("{:07}", id),
            date: Some("2024-04-01".into()),
            counterparty: CounterpartyRef {
                name: client.to_string(),
                ..Default::default()
            },
            seller: None,
            lines: vec![DetailLine {
                id: None,
                product: ProductRef {
                    id: Some(1),
                    name: product.to_string(),
                },
                quantity: 1.0,
                unit_price: 10.0,
                total: None,
            }],
        }
    }

    fn browser_with(n: i64) -> RecordBrowser<TransactionRecord> {
        let mut browser = RecordBrowser::new();
        let rows = (1..=n)
            .map(|i| {
                let client = if i % 2 == 0 { "Ferretería Lima" } else { "Constructora Sur" };
                record(i, client, if i % 3 == 0 { "Cemento" } else { "Clavos" })
            })
            .collect();
        browser.load(Ok(rows));
        browser
    }

    #[test]
    fn test_pagination_clamps() {
        let mut browser = browser_with(40);
        assert_eq!(browser.page_count(), 3);
        browser.go_to_page(99);
        assert_eq!(browser.page(), 3);
        assert_eq!(browser.page_rows().len(), 10);
        assert_eq!(browser.visible_range(), (31, 40, 40));
        browser.go_to_page(0);
        assert_eq!(browser.page(), 1);
        browser.prev_page();
        assert_eq!(browser.page(), 1);
        browser.next_page();
        assert_eq!(browser.page(), 2);
        assert_eq!(browser.visible_range(), (16, 30, 40));
    }

    #[test]
    fn test_unknown_counterparty_gives_empty_single_page() {
        let mut browser = browser_with(40);
        browser.set_counterparty_filter(Some("Nadie SAC".into()));
        assert!(browser.page_rows().is_empty());
        assert_eq!(browser.page_count(), 1);
        assert_eq!(browser.visible_range(), (0, 0, 0));
    }

    #[test]
    fn test_search_change_resets_to_first_page() {
        let mut browser = browser_with(40);
        browser.go_to_page(3);
        assert_eq!(browser.page(), 3);
        browser.set_search("clavos");
        assert_eq!(browser.page(), 1);

        browser.go_to_page(2);
        browser.set_counterparty_filter(Some("Ferretería Lima".into()));
        assert_eq!(browser.page(), 1);
    }

    #[test]
    fn test_search_and_filter_compose() {
        let mut browser = browser_with(12);
        browser.set_search("CEMENTO");
        // ids 3, 6, 9, 12
        assert_eq!(browser.filtered_count(), 4);
        browser.set_counterparty_filter(Some("Ferretería Lima".into()));
        // even ids among them: 6, 12
        let ids: Vec<i64> = browser.page_rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![6, 12]);

        browser.set_search("0000012");
        assert_eq!(browser.filtered_count(), 1);
    }

    #[test]
    fn test_export_ignores_filters() {
        let mut browser = browser_with(20);
        browser.set_search("cemento");
        browser.set_counterparty_filter(Some("Constructora Sur".into()));
        browser.go_to_page(2);
        assert_eq!(browser.export_rows().len(), 20);
    }

    #[test]
    fn test_counterparty_options_first_seen_order() {
        let browser = browser_with(5);
        assert_eq!(
            browser.counterparty_options(),
            vec!["Constructora Sur".to_string(), "Ferretería Lima".to_string()]
        );
    }

    #[test]
    fn test_failed_load_is_scoped_and_empty() {
        let mut browser = browser_with(5);
        browser.load(Err(AppError::Network("timeout".into())));
        assert!(browser.export_rows().is_empty());
        assert!(browser.page_rows().is_empty());
        assert!(browser.error().is_some());
        assert!(browser.is_loaded());

        browser.load(Ok(vec![record(1, "A", "B")]));
        assert_eq!(browser.error(), None);
    }
}
