use crate::domain::a001_unit_type::aggregate::UnitType;
use crate::domain::common::PersonRef;
use serde::{Deserialize, Serialize};

/// Catalog item (`GET productos/`, `GET productos/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio_compra", default)]
    pub purchase_price: Option<f64>,
    #[serde(rename = "precio_venta", default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(rename = "tipo_unidad", default)]
    pub unit_type: Option<UnitType>,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "proveedores", default)]
    pub providers: Vec<PersonRef>,
}

impl Product {
    /// Units on hand, never negative
    pub fn available_stock(&self) -> u32 {
        self.stock.unwrap_or(0).clamp(0, u32::MAX as i64) as u32
    }

    pub fn unit_type_name(&self) -> &str {
        self.unit_type
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("Sin unidad")
    }
}

/// Create/update form, sent as multipart so an image can ride along
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub purchase_price: String,
    pub sale_price: String,
    pub stock: String,
    pub unit_type_id: Option<i64>,
    pub provider_id: Option<i64>,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            purchase_price: product
                .purchase_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            sale_price: product.sale_price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            unit_type_id: product.unit_type.as_ref().map(|u| u.id),
            provider_id: product.providers.first().and_then(|p| p.id),
        }
    }

    /// Label of the first required field left empty or malformed
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Nombre");
        }
        if self.sale_price.trim().parse::<f64>().map_or(true, |p| p < 0.0) {
            return Some("Precio de venta");
        }
        if !self.purchase_price.trim().is_empty()
            && self.purchase_price.trim().parse::<f64>().map_or(true, |p| p < 0.0)
        {
            return Some("Precio de compra");
        }
        if self.stock.trim().parse::<u32>().is_err() {
            return Some("Stock");
        }
        None
    }

    /// Text fields of the multipart body, in API field names
    pub fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("nombre", self.name.trim().to_string())];
        if !self.description.trim().is_empty() {
            fields.push(("descripcion", self.description.trim().to_string()));
        }
        if !self.purchase_price.trim().is_empty() {
            fields.push(("precio_compra", self.purchase_price.trim().to_string()));
        }
        fields.push(("precio_venta", self.sale_price.trim().to_string()));
        fields.push(("stock", self.stock.trim().to_string()));
        if let Some(unit) = self.unit_type_id {
            fields.push(("tUnidad", unit.to_string()));
        }
        if let Some(provider) = self.provider_id {
            fields.push(("proveedor_id", provider.to_string()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Azúcar rubia".to_string(),
            sale_price: "4.20".to_string(),
            stock: "30".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_validation_reports_first_missing_field() {
        assert_eq!(valid_form().first_invalid_field(), None);

        let mut form = valid_form();
        form.name = "  ".to_string();
        assert_eq!(form.first_invalid_field(), Some("Nombre"));

        let mut form = valid_form();
        form.stock = "-3".to_string();
        assert_eq!(form.first_invalid_field(), Some("Stock"));

        let mut form = valid_form();
        form.purchase_price = "abc".to_string();
        assert_eq!(form.first_invalid_field(), Some("Precio de compra"));
    }

    #[test]
    fn test_multipart_fields_skip_empty_optionals() {
        let mut form = valid_form();
        form.unit_type_id = Some(2);
        let fields = form.multipart_fields();
        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["nombre", "precio_venta", "stock", "tUnidad"]);
    }

    #[test]
    fn test_negative_stock_is_clamped() {
        let product: Product =
            serde_json::from_str(r#"{"id":1,"nombre":"X","stock":-4,"precio_venta":2.5}"#).unwrap();
        assert_eq!(product.available_stock(), 0);
        assert_eq!(product.unit_type_name(), "Sin unidad");
    }
}
