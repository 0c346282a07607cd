//! API utilities for frontend-backend communication
//!
//! Resolves the API base URL and wraps `gloo-net` requests so every call
//! returns `Result<T, AppError>` with the bearer token attached.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::FormData;

use super::error::AppError;

/// Port the API listens on when `API_URL` is not set at build time
const DEFAULT_API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// Taken from the `API_URL` build-time environment variable when present,
/// otherwise built from the current window location on port 8000.
///
/// # Returns
/// - API base URL like "http://localhost:8000", without trailing slash
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(configured) = option_env!("API_URL") {
        return normalize_base(configured);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from a resource path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("productos/12");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", normalize_base(base), path.trim_start_matches('/'))
}

/// Map a non-2xx answer onto the error taxonomy.
///
/// FastAPI bodies look like `{"detail": "..."}` or, for 422, a list of
/// `{"msg": "..."}` entries.
pub fn error_from_status(status: u16, body: &str) -> AppError {
    let detail = extract_detail(body);
    match status {
        401 => AppError::Authentication(detail),
        403 => AppError::Authorization(detail),
        _ => AppError::Remote { status, detail },
    }
}

fn extract_detail(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return String::new(),
    };
    match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// HTTP client bound to the token of the current session (if any)
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .authorize(Request::get(&api_url(path)))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        read_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(Request::post(&api_url(path)))
            .json(body)
            .map_err(|e| AppError::Decode(format!("Failed to serialize request: {}", e)))?;
        send(request).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(Request::put(&api_url(path)))
            .json(body)
            .map_err(|e| AppError::Decode(format!("Failed to serialize request: {}", e)))?;
        send(request).await
    }

    /// PATCH without a body (state toggles)
    pub async fn patch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self
            .authorize(Request::patch(&api_url(path)))
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        read_json(response).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> Result<T, AppError> {
        let request = self
            .authorize(Request::post(&api_url(path)))
            .body(form)
            .map_err(|e| AppError::Decode(format!("Failed to build form request: {}", e)))?;
        send(request).await
    }

    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
    ) -> Result<T, AppError> {
        let request = self
            .authorize(Request::put(&api_url(path)))
            .body(form)
            .map_err(|e| AppError::Decode(format!("Failed to build form request: {}", e)))?;
        send(request).await
    }
}

async fn send<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{} {} -> {}", response.url(), status, body);
        return Err(error_from_status(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://api.local:8000/", "/productos/"),
            "http://api.local:8000/productos/"
        );
        assert_eq!(
            join_url("http://api.local:8000", "auth/me"),
            "http://api.local:8000/auth/me"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_from_status(401, r#"{"detail":"Token inválido"}"#),
            AppError::Authentication(d) if d == "Token inválido"
        ));
        assert!(matches!(
            error_from_status(403, ""),
            AppError::Authorization(_)
        ));
        assert_eq!(
            error_from_status(404, r#"{"detail":"Compra no encontrada"}"#),
            AppError::Remote {
                status: 404,
                detail: "Compra no encontrada".to_string()
            }
        );
    }

    #[test]
    fn test_validation_detail_list_is_joined() {
        let body = r#"{"detail":[{"loc":["body","correo"],"msg":"field required"},{"msg":"value is not a valid email"}]}"#;
        assert_eq!(
            error_from_status(422, body),
            AppError::Remote {
                status: 422,
                detail: "field required; value is not a valid email".to_string()
            }
        );
    }

    #[test]
    fn test_non_json_body_gives_empty_detail() {
        assert_eq!(
            error_from_status(502, "<html>Bad Gateway</html>"),
            AppError::Remote {
                status: 502,
                detail: String::new()
            }
        );
    }
}
