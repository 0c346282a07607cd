use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a006_purchase::aggregate::{PurchaseCreated, PurchaseDraft};
use contracts::domain::common::{NextOrderNumber, TransactionRecord};

pub async fn fetch_purchases(client: &ApiClient) -> Result<Vec<TransactionRecord>, AppError> {
    client.get_json("compras/").await
}

pub async fn fetch_purchase(client: &ApiClient, id: i64) -> Result<TransactionRecord, AppError> {
    client.get_json(&format!("compras/{}", id)).await
}

pub async fn fetch_next_number(client: &ApiClient) -> Result<NextOrderNumber, AppError> {
    client.get_json("compras/siguiente-numero").await
}

pub async fn create_purchase(
    client: &ApiClient,
    draft: &PurchaseDraft,
) -> Result<PurchaseCreated, AppError> {
    client.post_json("compras/", draft).await
}
