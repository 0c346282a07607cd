use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a005_sale::aggregate::{SaleCreated, SaleDraft};
use contracts::domain::common::{NextOrderNumber, TransactionRecord};

pub async fn fetch_sales(client: &ApiClient) -> Result<Vec<TransactionRecord>, AppError> {
    client.get_json("ventas/").await
}

pub async fn fetch_sale(client: &ApiClient, id: i64) -> Result<TransactionRecord, AppError> {
    client.get_json(&format!("ventas/{}", id)).await
}

pub async fn fetch_next_number(client: &ApiClient) -> Result<NextOrderNumber, AppError> {
    client.get_json("ventas/siguiente-numero").await
}

pub async fn create_sale(client: &ApiClient, draft: &SaleDraft) -> Result<SaleCreated, AppError> {
    client.post_json("ventas/", draft).await
}
