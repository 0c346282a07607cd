use async_trait::async_trait;
use contracts::domain::a002_product::aggregate::Product;
use contracts::domain::a004_provider::aggregate::Provider;
use contracts::domain::a006_purchase::aggregate::PurchaseDraft;
use contracts::domain::common::OrderLineDraft;

use crate::domain::a006_purchase::api;
use crate::shared::api_utils::ApiClient;
use crate::shared::composer::{
    CatalogItem, CommittedOrder, Counterparty, CounterpartySnapshot, OrderGateway,
    TransactionKind,
};
use crate::shared::error::AppError;

/// `compras/` side of the composer
pub struct PurchasesGateway {
    client: ApiClient,
}

impl PurchasesGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl OrderGateway for PurchasesGateway {
    fn kind(&self) -> TransactionKind {
        TransactionKind::Purchase
    }

    async fn next_number(&self) -> Result<String, AppError> {
        Ok(api::fetch_next_number(&self.client).await?.number)
    }

    async fn create_order(
        &self,
        counterparty_id: i64,
        lines: Vec<OrderLineDraft>,
    ) -> Result<CommittedOrder, AppError> {
        let draft = PurchaseDraft {
            provider_id: counterparty_id,
            lines,
        };
        let created = api::create_purchase(&self.client, &draft).await?;
        if let Some(message) = &created.message {
            log::debug!("purchase {}: {}", created.order_number, message);
        }
        Ok(CommittedOrder {
            id: created.id,
            number: created.order_number,
            date: None,
        })
    }
}

impl Counterparty for Provider {
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

/// Purchases are not capped by stock; the price starts at the last purchase price
pub fn purchase_item(product: &Product) -> CatalogItem {
    CatalogItem {
        id: product.id,
        name: product.name.clone(),
        unit_price: product.purchase_price.unwrap_or(0.0),
        stock: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::composer::Cart;

    #[test]
    fn test_purchase_lines_are_uncapped() {
        let product: Product = serde_json::from_str(
            r#"{"id":3,"nombre":"Harina","stock":0,"precio_compra":2.0,"precio_venta":3.5}"#,
        )
        .unwrap();
        let item = purchase_item(&product);
        assert_eq!(item.unit_price, 2.0);

        let mut cart = Cart::new();
        assert!(cart.add_line(&item));
        assert!(cart.set_quantity(3, 500));
        assert_eq!(cart.quantity_of(3), 500);
        assert!(cart.set_unit_price(3, 1.75));
        assert!((cart.total() - 875.0).abs() < 1e-9);
    }

    #[test]
    fn test_provider_snapshot() {
        let provider = Provider {
            id: 12,
            name: "Molinos del Norte".into(),
            address: None,
            phone: None,
            email: None,
            document: Some("20512345678".into()),
        };
        let snapshot = provider.snapshot();
        assert_eq!(snapshot.name, "Molinos del Norte");
        assert_eq!(snapshot.tax_id.as_deref(), Some("20512345678"));
    }
}
