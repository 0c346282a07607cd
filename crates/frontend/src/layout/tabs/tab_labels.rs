//! Tab titles by key. Top-level entries take their label from the navigation catalog.

use crate::system::auth::access::nav_label_for_key;

/// `(detail key prefix, entity label)`
const DETAIL_PREFIXES: &[(&str, &str)] = &[
    ("a002_product_detail_", "Producto"),
    ("a003_client_detail_", "Cliente"),
    ("a004_provider_detail_", "Proveedor"),
    ("a005_sale_detail_", "Venta"),
    ("a006_purchase_detail_", "Compra"),
];

pub fn tab_label_for_key(key: &str) -> String {
    if let Some(label) = nav_label_for_key(key) {
        return label.to_string();
    }
    match key {
        "a002_product_new" => return "Nuevo producto".to_string(),
        "a003_client_new" => return "Nuevo cliente".to_string(),
        "a004_provider_new" => return "Nuevo proveedor".to_string(),
        _ => {}
    }
    DETAIL_PREFIXES
        .iter()
        .find_map(|(prefix, entity)| {
            key.strip_prefix(prefix)
                .map(|id| detail_tab_label(entity, id))
        })
        .unwrap_or_else(|| key.to_string())
}

/// `«<entity> · <identifier>»`, e.g. `"Venta · 0000015"`
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a005_sale"), "Historial de ventas");
        assert_eq!(tab_label_for_key("a003_client_new"), "Nuevo cliente");
        assert_eq!(tab_label_for_key("a006_purchase_detail_7"), "Compra · 7");
        assert_eq!(tab_label_for_key("zzz"), "zzz");
    }
}
