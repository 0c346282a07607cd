use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a004_provider::aggregate::{Provider, ProviderForm};

pub async fn fetch_providers(client: &ApiClient) -> Result<Vec<Provider>, AppError> {
    client.get_json("proveedores/").await
}

pub async fn fetch_provider(client: &ApiClient, id: i64) -> Result<Provider, AppError> {
    client.get_json(&format!("proveedores/{}", id)).await
}

/// `POST proveedores/` for a new provider, `PUT proveedores/{id}` otherwise
pub async fn save_provider(api: &ApiClient, form: &ProviderForm) -> Result<Provider, AppError> {
    if let Some(field) = form.first_invalid_field() {
        return Err(AppError::required(field));
    }
    match form.id {
        Some(id) => api.put_json(&format!("proveedores/{}", id), form).await,
        None => api.post_json("proveedores/", form).await,
    }
}
