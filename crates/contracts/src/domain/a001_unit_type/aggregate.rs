use serde::{Deserialize, Serialize};

/// Unit of measure a product is sold in (`GET tipo-unidad/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitType {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
}
