use serde::{Deserialize, Serialize};

/// Customer on the selling side (`clientes/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
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
    #[serde(rename = "tipoDocumento", default)]
    pub document_type: Option<String>,
}

impl Client {
    /// "Nombre - documento" as shown in pickers
    pub fn display_name(&self) -> String {
        match self.document.as_deref() {
            Some(doc) if !doc.is_empty() => format!("{} - {}", self.name, doc),
            _ => self.name.clone(),
        }
    }
}

/// Body of `POST clientes/` and `PUT clientes/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientForm {
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
    #[serde(rename = "tipoDocumento")]
    pub document_type: String,
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            id: Some(client.id),
            name: client.name.clone(),
            address: client.address.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            email: client.email.clone().unwrap_or_default(),
            document: client.document.clone().unwrap_or_default(),
            document_type: client.document_type.clone().unwrap_or_default(),
        }
    }

    pub fn first_invalid_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Nombre");
        }
        if self.document.trim().is_empty() {
            return Some("Documento");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_appends_document() {
        let client: Client =
            serde_json::from_str(r#"{"id":1,"nombre":"Bodega Lucía","documento":"10456789012"}"#)
                .unwrap();
        assert_eq!(client.display_name(), "Bodega Lucía - 10456789012");

        let anonymous: Client = serde_json::from_str(r#"{"id":2,"nombre":"Mostrador"}"#).unwrap();
        assert_eq!(anonymous.display_name(), "Mostrador");
    }

    #[test]
    fn test_form_requires_name_then_document() {
        let mut form = ClientForm::default();
        assert_eq!(form.first_invalid_field(), Some("Nombre"));
        form.name = "  Bodega  ".into();
        assert_eq!(form.first_invalid_field(), Some("Documento"));
        form.document = "10456789012".into();
        assert_eq!(form.first_invalid_field(), None);
    }
}
