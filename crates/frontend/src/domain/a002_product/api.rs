use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a002_product::aggregate::{Product, ProductForm};
use web_sys::{File, FormData};

pub async fn fetch_products(client: &ApiClient) -> Result<Vec<Product>, AppError> {
    client.get_json("productos/").await
}

pub async fn fetch_product(client: &ApiClient, id: i64) -> Result<Product, AppError> {
    client.get_json(&format!("productos/{}", id)).await
}

/// Products supplied by one provider (purchase screen catalog)
pub async fn fetch_products_by_provider(
    client: &ApiClient,
    provider_id: i64,
) -> Result<Vec<Product>, AppError> {
    client
        .get_json(&format!("productos/proveedor/{}", provider_id))
        .await
}

fn form_data(form: &ProductForm, image: Option<&File>) -> Result<FormData, AppError> {
    let to_error = |e: wasm_bindgen::JsValue| AppError::Decode(format!("FormData: {:?}", e));
    let data = FormData::new().map_err(to_error)?;
    for (name, value) in form.multipart_fields() {
        data.append_with_str(name, &value).map_err(to_error)?;
    }
    if let Some(file) = image {
        data.append_with_blob_and_filename("imagen", file, &file.name())
            .map_err(to_error)?;
    }
    Ok(data)
}

/// Create (`POST productos/`) or update (`PUT productos/{id}`) as multipart
pub async fn save_product(
    client: &ApiClient,
    form: &ProductForm,
    image: Option<File>,
) -> Result<Product, AppError> {
    if let Some(field) = form.first_invalid_field() {
        return Err(AppError::required(field));
    }
    let data = form_data(form, image.as_ref())?;
    match form.id {
        Some(id) => client.put_form(&format!("productos/{}", id), data).await,
        None => client.post_form("productos/", data).await,
    }
}
