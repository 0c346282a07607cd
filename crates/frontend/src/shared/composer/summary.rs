use chrono::{NaiveDate, NaiveDateTime};
use contracts::domain::common::TransactionRecord;

use super::cart::CartLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Sale,
    Purchase,
}

impl TransactionKind {
    pub fn title(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "Orden de venta",
            TransactionKind::Purchase => "Orden de compra",
        }
    }

    pub fn counterparty_label(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "Cliente",
            TransactionKind::Purchase => "Proveedor",
        }
    }

    /// Prefix of exported files
    pub fn file_stem(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "orden_venta",
            TransactionKind::Purchase => "orden_compra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterpartySnapshot {
    pub name: String,
    pub tax_id: Option<String>,
}

/// Immutable record of a committed order; the document is built from this only.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub kind: TransactionKind,
    pub order_number: String,
    pub date: NaiveDate,
    pub counterparty: CounterpartySnapshot,
    pub seller: Option<String>,
    pub lines: Vec<CartLine>,
    /// Fixed at creation time
    pub grand_total: f64,
}

impl OrderSummary {
    pub fn new(
        kind: TransactionKind,
        order_number: String,
        date: NaiveDate,
        counterparty: CounterpartySnapshot,
        seller: Option<String>,
        lines: Vec<CartLine>,
    ) -> Self {
        let grand_total = lines.iter().fold(0.0, |acc, l| acc + l.line_total());
        Self {
            kind,
            order_number,
            date,
            counterparty,
            seller,
            lines,
            grand_total,
        }
    }
}

impl OrderSummary {
    /// Rebuild the summary of a document already stored on the server
    /// (re-printing from the history screens). `None` without a readable date.
    pub fn from_record(kind: TransactionKind, record: &TransactionRecord) -> Option<Self> {
        let date = record.date.as_deref().and_then(parse_api_date)?;
        let lines = record
            .lines
            .iter()
            .map(|l| CartLine {
                item_id: l.product.id.unwrap_or_default(),
                name: l.product.name.clone(),
                unit_price: l.unit_price,
                quantity: l.quantity.max(0.0).round() as u32,
                stock_limit: None,
            })
            .collect();
        Some(Self::new(
            kind,
            record.order_number.clone(),
            date,
            CounterpartySnapshot {
                name: record.counterparty.name.clone(),
                tax_id: record.counterparty.document.clone(),
            },
            record.seller.as_ref().map(|s| s.name.clone()),
            lines,
        ))
    }
}

/// Date part of an API timestamp ("2024-03-01", "2024-03-01T09:15:00", ...)
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grand_total_is_fixed_at_creation() {
        let lines = vec![
            CartLine {
                item_id: 1,
                name: "Cemento".into(),
                unit_price: 10.0,
                quantity: 2,
                stock_limit: Some(5),
            },
            CartLine {
                item_id: 2,
                name: "Arena".into(),
                unit_price: 5.0,
                quantity: 1,
                stock_limit: Some(5),
            },
        ];
        let summary = OrderSummary::new(
            TransactionKind::Sale,
            "0000012".into(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            CounterpartySnapshot::default(),
            None,
            lines,
        );
        assert!((summary.grand_total - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_total_is_positive_zero() {
        let summary = OrderSummary::new(
            TransactionKind::Purchase,
            "0000001".into(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            CounterpartySnapshot::default(),
            None,
            vec![],
        );
        assert!(summary.grand_total.is_sign_positive());
    }

    #[test]
    fn test_from_record() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"id": 5, "orden_venta": "0000005", "fecha": "2024-05-02T10:00:00",
                "cliente": {"nombre": "Ana", "documento": "44556677"},
                "vendedor": {"id": 2, "nombre": "Luis Rojas"},
                "detalles": [{"producto": {"id": 3, "nombre": "Martillo"}, "cantidad": 2, "precio_unitario": 15.5}]}"#,
        )
        .unwrap();
        let summary = OrderSummary::from_record(TransactionKind::Sale, &record).unwrap();
        assert_eq!(summary.order_number, "0000005");
        assert_eq!(summary.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(summary.counterparty.tax_id.as_deref(), Some("44556677"));
        assert_eq!(summary.seller.as_deref(), Some("Luis Rojas"));
        assert_eq!(summary.lines[0].quantity, 2);
        assert!((summary.grand_total - 31.0).abs() < 1e-9);

        let undated = TransactionRecord { date: None, ..record };
        assert!(OrderSummary::from_record(TransactionKind::Sale, &undated).is_none());
    }

    #[test]
    fn test_parse_api_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_api_date("2024-03-01"), expected);
        assert_eq!(parse_api_date("2024-03-01T09:15:00"), expected);
        assert_eq!(parse_api_date("2024-03-01T09:15:00.123456"), expected);
        assert_eq!(parse_api_date("2024-03-01T09:15:00Z"), expected);
        assert_eq!(parse_api_date("ayer"), None);
    }
}
