use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a001_unit_type::aggregate::UnitType;

/// Units of measure offered by the product form
pub async fn fetch_unit_types(client: &ApiClient) -> Result<Vec<UnitType>, AppError> {
    client.get_json("tipo-unidad/").await
}
