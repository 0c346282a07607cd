use async_trait::async_trait;
use contracts::system::auth::{LoginRequest, TokenResponse, UserInfo};

use super::session::IdentityResolver;
use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;

/// Exchange credentials for a bearer token
pub async fn login(email: String, password: String) -> Result<TokenResponse, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::required("Correo"));
    }
    if password.is_empty() {
        return Err(AppError::required("Contraseña"));
    }
    let request = LoginRequest {
        email: email.trim().to_string(),
        password,
    };
    ApiClient::anonymous()
        .post_json("auth/login", &request)
        .await
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, AppError> {
    ApiClient::new(Some(access_token.to_string()))
        .get_json("auth/me")
        .await
}

/// Resolves identities against `GET auth/me`
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteIdentityResolver;

#[async_trait(?Send)]
impl IdentityResolver for RemoteIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<UserInfo, AppError> {
        get_current_user(token).await
    }
}
