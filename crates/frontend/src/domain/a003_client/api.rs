use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a003_client::aggregate::{Client, ClientForm};

pub async fn fetch_clients(client: &ApiClient) -> Result<Vec<Client>, AppError> {
    client.get_json("clientes/").await
}

pub async fn fetch_client(client: &ApiClient, id: i64) -> Result<Client, AppError> {
    client.get_json(&format!("clientes/{}", id)).await
}

/// `POST clientes/` for a new client, `PUT clientes/{id}` otherwise
pub async fn save_client(api: &ApiClient, form: &ClientForm) -> Result<Client, AppError> {
    if let Some(field) = form.first_invalid_field() {
        return Err(AppError::required(field));
    }
    match form.id {
        Some(id) => api.put_json(&format!("clientes/{}", id), form).await,
        None => api.post_json("clientes/", form).await,
    }
}
