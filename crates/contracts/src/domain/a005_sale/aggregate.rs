use crate::domain::common::OrderLineDraft;
use serde::{Deserialize, Serialize};

/// Body of `POST ventas/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    #[serde(rename = "cliente_id")]
    pub client_id: i64,
    #[serde(rename = "detalles")]
    pub lines: Vec<OrderLineDraft>,
}

/// Response of `POST ventas/`.
///
/// Older API builds omit `orden_venta`; the caller then reads it back from
/// `GET ventas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleCreated {
    pub id: i64,
    #[serde(rename = "orden_venta", default)]
    pub order_number: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}
