use serde::{Deserialize, Serialize};

/// Supplier on the purchasing side (`proveedores/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
    #[serde(rename = "documento", default)]
    pub document: Option<String>,
}

/// Body of `POST proveedores/` and `PUT proveedores/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderForm {
    #[serde(skip)]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "documento")]
    pub document: String,
}

impl ProviderForm {
    pub fn from_provider(provider: &Provider) -> Self {
        Self {
            id: Some(provider.id),
            name: provider.name.clone(),
            address: provider.address.clone().unwrap_or_default(),
            phone: provider.phone.clone().unwrap_or_default(),
            email: provider.email.clone().unwrap_or_default(),
            document: provider.document.clone().unwrap_or_default(),
        }
    }

    pub fn first_invalid_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Nombre");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_name_only() {
        let mut form = ProviderForm::default();
        assert_eq!(form.first_invalid_field(), Some("Nombre"));
        form.name = "Molinos del Norte".into();
        assert_eq!(form.first_invalid_field(), None);
    }

    #[test]
    fn test_form_body_skips_id() {
        let form = ProviderForm {
            id: Some(9),
            name: "Molinos".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["nombre"], "Molinos");
    }
}
