use async_trait::async_trait;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a003_client::aggregate::Client;
use contracts::domain::a005_sale::aggregate::SaleDraft;
use contracts::domain::common::OrderLineDraft;

use crate::domain::a005_sale::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::composer::{
    CatalogItem, CommittedOrder, Counterparty, CounterpartySnapshot, OrderGateway,
    TransactionKind,
};
use crate::shared::error::AppError;
use crate::shared::list_utils::contains_ci;

/// `ventas/` side of the composer
pub struct SalesGateway {
    client: ApiClient,
}

impl SalesGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl OrderGateway for SalesGateway {
    fn kind(&self) -> TransactionKind {
        TransactionKind::Sale
    }

    async fn next_number(&self) -> Result<String, AppError> {
        Ok(api::fetch_next_number(&self.client).await?.number)
    }

    async fn create_order(
        &self,
        counterparty_id: i64,
        lines: Vec<OrderLineDraft>,
    ) -> Result<CommittedOrder, AppError> {
        let draft = SaleDraft {
            client_id: counterparty_id,
            lines,
        };
        let created = api::create_sale(&self.client, &draft).await?;
        match created.order_number {
            Some(number) => Ok(CommittedOrder {
                id: created.id,
                number,
                date: created.date,
            }),
            None => {
                // Number not echoed back: read the stored document
                let stored = api::fetch_sale(&self.client, created.id).await?;
                Ok(CommittedOrder {
                    id: stored.id,
                    number: stored.order_number,
                    date: stored.date.or(created.date),
                })
            }
        }
    }
}

impl Counterparty for Client {
    fn id(&self) -> i64 {
        self.id
    }

    fn snapshot(&self) -> CounterpartySnapshot {
        CounterpartySnapshot {
            name: self.name.clone(),
            tax_id: self.document.clone().filter(|d| !d.is_empty()),
        }
    }
}

/// Sales are capped by the stock on hand and priced at the sale price
pub fn sale_item(product: &Product) -> CatalogItem {
    CatalogItem {
        id: product.id,
        name: product.name.clone(),
        unit_price: product.sale_price.unwrap_or(0.0),
        stock: Some(product.available_stock()),
    }
}

/// Products whose name or unit type contains `query` (case-insensitive)
pub fn search_catalog<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || contains_ci(&p.name, &needle)
                || contains_ci(p.unit_type_name(), &needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_unit_type::aggregate::UnitType;

    fn product(id: i64, name: &str, unit: Option<&str>, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            purchase_price: Some(3.0),
            sale_price: Some(4.5),
            stock: Some(stock),
            unit_type: unit.map(|u| UnitType {
                id: 1,
                name: u.to_string(),
            }),
            image: None,
            providers: vec![],
        }
    }

    #[test]
    fn test_search_matches_name_or_unit() {
        let products = vec![
            product(1, "Arroz Costeño", Some("Saco"), 10),
            product(2, "Aceite", Some("Botella"), 3),
            product(3, "Sacapuntas", None, 8),
        ];
        let ids = |q: &str| -> Vec<i64> {
            search_catalog(&products, q).iter().map(|p| p.id).collect()
        };
        assert_eq!(ids(""), vec![1, 2, 3]);
        assert_eq!(ids("SACO"), vec![1]);
        assert_eq!(ids("saca"), vec![3]);
        assert_eq!(ids("botella"), vec![2]);
        assert!(ids("leche").is_empty());
    }

    #[test]
    fn test_sale_item_is_capped_by_stock() {
        let item = sale_item(&product(7, "Fideos", None, -2));
        assert_eq!(item.stock, Some(0));
        assert_eq!(item.unit_price, 4.5);
    }

    #[test]
    fn test_client_snapshot_drops_empty_document() {
        let client = Client {
            id: 4,
            name: "Bodega Lucía".into(),
            address: None,
            phone: None,
            email: None,
            document: Some(String::new()),
            document_type: None,
        };
        assert_eq!(client.snapshot().tax_id, None);
        assert_eq!(Counterparty::id(&client), 4);
    }
}
