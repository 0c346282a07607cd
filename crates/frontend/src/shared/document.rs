//! Printable order document (A4 HTML) built from a committed [`OrderSummary`].

use super::components::table::number_format::{format_amount, format_money};
use super::composer::{OrderSummary, TransactionKind};
use super::date_utils::format_naive_date;
use super::export::{download_text, file_name_part};

/// `orden_venta_<cliente>_<numero>.html` / `orden_compra_<numero>.html`
pub fn document_file_name(summary: &OrderSummary) -> String {
    match summary.kind {
        TransactionKind::Sale => format!(
            "{}_{}_{}.html",
            summary.kind.file_stem(),
            file_name_part(&summary.counterparty.name),
            file_name_part(&summary.order_number)
        ),
        TransactionKind::Purchase => format!(
            "{}_{}.html",
            summary.kind.file_stem(),
            file_name_part(&summary.order_number)
        ),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const DOCUMENT_STYLE: &str = r#"
@page { size: A4; margin: 18mm; }
body { font-family: Arial, Helvetica, sans-serif; font-size: 12px; color: #222; }
.doc-header { display: flex; justify-content: space-between; border-bottom: 2px solid #333; padding-bottom: 8px; }
.doc-header h1 { font-size: 20px; margin: 0; }
.doc-number { font-size: 16px; font-weight: bold; text-align: right; }
.doc-party { margin: 16px 0; padding: 10px; border: 1px solid #ccc; }
.doc-party p { margin: 2px 0; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 6px; }
th { background: #f0f0f0; text-align: left; }
td.num { text-align: right; }
.doc-total { margin-top: 12px; text-align: right; font-size: 14px; font-weight: bold; }
"#;

/// Full HTML text of the document
pub fn render_order_document(summary: &OrderSummary) -> String {
    let kind = summary.kind;
    let mut rows = String::new();
    for (index, line) in summary.lines.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            index + 1,
            escape_html(&line.name),
            line.quantity,
            format_amount(line.unit_price),
            format_amount(line.line_total()),
        ));
    }

    let tax_id = summary
        .counterparty
        .tax_id
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| format!("<p><strong>Documento:</strong> {}</p>", escape_html(t)))
        .unwrap_or_default();
    let seller = summary
        .seller
        .as_deref()
        .map(|s| format!("<p><strong>Vendedor:</strong> {}</p>", escape_html(s)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{title} {number}</title>
<style>{style}</style>
</head>
<body>
<div class="doc-header">
<div><h1>{title}</h1><p>Fecha: {date}</p></div>
<div class="doc-number">N° {number}</div>
</div>
<div class="doc-party">
<p><strong>{party_label}:</strong> {party}</p>
{tax_id}{seller}
</div>
<table>
<thead><tr><th>#</th><th>Producto</th><th>Cantidad</th><th>Precio unit.</th><th>Subtotal</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="doc-total">Total: {total}</div>
</body>
</html>
"#,
        title = kind.title(),
        number = escape_html(&summary.order_number),
        style = DOCUMENT_STYLE,
        date = format_naive_date(summary.date),
        party_label = kind.counterparty_label(),
        party = escape_html(&summary.counterparty.name),
        tax_id = tax_id,
        seller = seller,
        rows = rows,
        total = format_money(summary.grand_total),
    )
}

/// Render and download the document of `summary`
pub fn download_order_document(summary: &OrderSummary) -> Result<(), String> {
    let html = render_order_document(summary);
    let filename = document_file_name(summary);
    download_text(&html, "text/html;charset=utf-8;", &filename)?;
    log::info!("order document {} downloaded", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::composer::{CartLine, CounterpartySnapshot};
    use chrono::NaiveDate;

    fn summary(kind: TransactionKind) -> OrderSummary {
        OrderSummary::new(
            kind,
            "0000015".into(),
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
            CounterpartySnapshot {
                name: "Juan <Pérez>".into(),
                tax_id: Some("45678912".into()),
            },
            Some("Ana Quispe".into()),
            vec![CartLine {
                item_id: 4,
                name: "Taladro".into(),
                unit_price: 1250.0,
                quantity: 2,
                stock_limit: Some(5),
            }],
        )
    }

    #[test]
    fn test_document_file_names() {
        assert_eq!(
            document_file_name(&summary(TransactionKind::Sale)),
            "orden_venta_Juan__Pérez__0000015.html"
        );
        assert_eq!(
            document_file_name(&summary(TransactionKind::Purchase)),
            "orden_compra_0000015.html"
        );
    }

    #[test]
    fn test_document_contains_committed_data() {
        let html = render_order_document(&summary(TransactionKind::Sale));
        assert!(html.contains("Orden de venta"));
        assert!(html.contains("N° 0000015"));
        assert!(html.contains("09/06/2024"));
        assert!(html.contains("Juan &lt;Pérez&gt;"));
        assert!(html.contains("45678912"));
        assert!(html.contains("Ana Quispe"));
        assert!(html.contains("Total: S/. 2 500.00"));
        assert!(html.contains("size: A4"));
    }
}
