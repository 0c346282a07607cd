use serde::{Deserialize, Serialize};

/// Preview of the next sequence number (`GET ventas|compras/siguiente-numero`).
///
/// Advisory only: the committed document carries the authoritative number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextOrderNumber {
    #[serde(rename = "numero_orden")]
    pub number: String,
}

/// One line of a sale or purchase being created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineDraft {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
}

/// Client or provider as embedded in a historical document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CounterpartyRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "documento", default)]
    pub document: Option<String>,
    #[serde(rename = "correo", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailLine {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "producto", default)]
    pub product: ProductRef,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
    #[serde(rename = "total", default)]
    pub total: Option<f64>,
}

impl DetailLine {
    /// Server-computed total when present, otherwise quantity × unit price
    pub fn line_total(&self) -> f64 {
        self.total.unwrap_or(self.quantity * self.unit_price)
    }
}

/// Committed sale or purchase as returned by the history endpoints.
///
/// Sales arrive as `{orden_venta, cliente, vendedor?}` and purchases as
/// `{orden_compra, proveedor}`; both map onto this one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    #[serde(alias = "orden_venta", alias = "orden_compra", default)]
    pub order_number: String,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(alias = "cliente", alias = "proveedor", default)]
    pub counterparty: CounterpartyRef,
    #[serde(rename = "vendedor", default)]
    pub seller: Option<PersonRef>,
    #[serde(rename = "detalles", default)]
    pub lines: Vec<DetailLine>,
}

impl TransactionRecord {
    pub fn grand_total(&self) -> f64 {
        self.lines.iter().fold(0.0, |acc, l| acc + l.line_total())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_record_shape() {
        let json = r#"{
            "id": 3,
            "orden_venta": "0000003",
            "fecha": "2025-06-01T10:15:00",
            "cliente": {"id": 2, "nombre": "Bodega Lucía", "documento": "20481234567"},
            "detalles": [
                {"id": 1, "producto": {"id": 9, "nombre": "Arroz 5kg"}, "cantidad": 2, "precio_unitario": 10.0, "total": 20.0},
                {"id": 2, "producto": {"id": 4, "nombre": "Aceite"}, "cantidad": 1, "precio_unitario": 5.5}
            ]
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.order_number, "0000003");
        assert_eq!(record.counterparty.name, "Bodega Lucía");
        assert_eq!(record.line_count(), 2);
        assert_eq!(record.grand_total(), 25.5);
        assert!(record.seller.is_none());
    }

    #[test]
    fn test_purchase_record_shape() {
        let json = r#"{
            "id": 8,
            "orden_compra": "0000008",
            "fecha": null,
            "proveedor": {"id": null, "nombre": "N/A", "documento": "N/A"},
            "detalles": []
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.order_number, "0000008");
        assert_eq!(record.counterparty.name, "N/A");
        assert_eq!(record.grand_total(), 0.0);
        assert!(record.grand_total().is_sign_positive());
        assert_eq!(record.line_count(), 0);
    }
}
