use contracts::system::users::{User, UserForm};

use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;

pub async fn fetch_users(client: &ApiClient) -> Result<Vec<User>, AppError> {
    client.get_json("users/").await
}

/// Create through `auth/registro`, update with `PUT users/{id}`
pub async fn save_user(client: &ApiClient, form: &UserForm) -> Result<User, AppError> {
    if let Some(field) = form.first_invalid_field() {
        return Err(AppError::required(field));
    }
    match form.id {
        Some(id) => {
            client
                .put_json(&format!("users/{}", id), &form.to_update(id))
                .await
        }
        None => client.post_json("auth/registro", &form.to_create()).await,
    }
}

/// Flip the active flag; the server answers with the updated row
pub async fn toggle_status(client: &ApiClient, id: i64) -> Result<User, AppError> {
    client.patch_json(&format!("users/{}/toggle-status", id)).await
}
