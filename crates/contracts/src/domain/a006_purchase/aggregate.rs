use crate::domain::common::OrderLineDraft;
use serde::{Deserialize, Serialize};

/// Body of `POST compras/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    #[serde(rename = "proveedor_id")]
    pub provider_id: i64,
    #[serde(rename = "productos")]
    pub lines: Vec<OrderLineDraft>,
}

/// Response of `POST compras/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCreated {
    pub id: i64,
    #[serde(rename = "orden_compra")]
    pub order_number: String,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}
