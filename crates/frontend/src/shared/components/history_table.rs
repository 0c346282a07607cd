//! Table and spreadsheet columns shared by the sales and purchase histories

use crate::shared::components::table::{
    format_amount, format_money, format_quantity, TableCellMoney,
};
use crate::shared::composer::{OrderSummary, TransactionKind};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::document::download_order_document;
use crate::shared::icons::icon;
use contracts::domain::common::TransactionRecord;
use leptos::prelude::*;
use thaw::*;

/// Status column value; committed documents have no other state
pub const STATUS_COMPLETED: &str = "Completada";

/// `Orden, Fecha, <Cliente|Proveedor>, Documento, Productos, Total, Estado`
pub fn history_headers(counterparty_label: &'static str) -> Vec<&'static str> {
    vec![
        "Orden",
        "Fecha",
        counterparty_label,
        "Documento",
        "Productos",
        "Total",
        "Estado",
    ]
}

/// One spreadsheet row; `Productos` is the number of lines on the document
pub fn history_csv_cells(record: &TransactionRecord) -> Vec<String> {
    vec![
        record.order_number.clone(),
        record.date.as_deref().map(format_date).unwrap_or_default(),
        record.counterparty.name.clone(),
        record
            .counterparty
            .document
            .clone()
            .unwrap_or_else(|| "-".to_string()),
        record.line_count().to_string(),
        format_amount(record.grand_total()),
        STATUS_COMPLETED.to_string(),
    ]
}

/// Short product summary: first name plus how many more
fn items_summary(record: &TransactionRecord) -> String {
    match record.lines.as_slice() {
        [] => "-".to_string(),
        [only] => only.product.name.clone(),
        [first, rest @ ..] => format!("{} y {} más", first.product.name, rest.len()),
    }
}

#[component]
pub fn HistoryTable(
    #[prop(into)] rows: Signal<Vec<TransactionRecord>>,
    counterparty_label: &'static str,
    on_open: Callback<TransactionRecord>,
) -> impl IntoView {
    view! {
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Orden"</TableHeaderCell>
                    <TableHeaderCell>"Fecha"</TableHeaderCell>
                    <TableHeaderCell min_width=200.0>{counterparty_label}</TableHeaderCell>
                    <TableHeaderCell>"Productos"</TableHeaderCell>
                    <TableHeaderCell>"Total"</TableHeaderCell>
                    <TableHeaderCell>"Estado"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {move || rows.get().into_iter().map(|record| {
                    let total = record.grand_total();
                    let date = record.date.as_deref().map(format_date).unwrap_or_else(|| "-".to_string());
                    let items = items_summary(&record);
                    let order_number = record.order_number.clone();
                    let counterparty = record.counterparty.name.clone();
                    view! {
                        <TableRow
                            on:click=move |_| on_open.run(record.clone())
                            attr:style="cursor: pointer;"
                        >
                            <TableCell><TableCellLayout>{order_number}</TableCellLayout></TableCell>
                            <TableCell>{date}</TableCell>
                            <TableCell>{counterparty}</TableCell>
                            <TableCell>{items}</TableCell>
                            <TableCellMoney value=Signal::derive(move || Some(total)) show_currency=true bold=true />
                            <TableCell>
                                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                    {STATUS_COMPLETED}
                                </Badge>
                            </TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>
    }
}

/// Read-only body of a stored sale or purchase: party block, lines, total
#[component]
pub fn TransactionDetailBody(record: TransactionRecord, kind: TransactionKind) -> impl IntoView {
    let (download_error, set_download_error) = signal(None::<String>);
    let summary = OrderSummary::from_record(kind, &record);
    let can_download = summary.is_some();
    let summary = StoredValue::new(summary);

    let download = move |_| {
        let result = summary.with_value(|s| match s {
            Some(summary) => download_order_document(summary),
            None => Err("El documento no tiene fecha".to_string()),
        });
        set_download_error.set(result.err());
    };

    let total = record.grand_total();
    let date = record
        .date
        .as_deref()
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string());
    let document = record
        .counterparty
        .document
        .clone()
        .unwrap_or_else(|| "-".to_string());
    let seller = record.seller.as_ref().map(|s| s.name.clone());
    let order_number = record.order_number.clone();
    let counterparty_name = record.counterparty.name.clone();
    let lines = record.lines;

    view! {
        <div class="transaction-detail">
            <div class="transaction-detail__party">
                <p><strong>"Orden: "</strong>{order_number}</p>
                <p><strong>"Fecha: "</strong>{date}</p>
                <p><strong>{kind.counterparty_label()}": "</strong>{counterparty_name}</p>
                <p><strong>"Documento: "</strong>{document}</p>
                {seller.map(|name| view! { <p><strong>"Vendedor: "</strong>{name}</p> })}
            </div>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=220.0>"Producto"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio unit."</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {lines.into_iter().map(|line| {
                        let unit_price = line.unit_price;
                        let subtotal = line.line_total();
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{line.product.name}</TableCellLayout></TableCell>
                                <TableCell class="text-right">{format_quantity(line.quantity)}</TableCell>
                                <TableCellMoney value=Signal::derive(move || Some(unit_price)) />
                                <TableCellMoney value=Signal::derive(move || Some(subtotal)) />
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            <div class="transaction-detail__total">
                "Total: "{format_money(total)}
            </div>

            <Show when=move || can_download>
                <Button appearance=ButtonAppearance::Secondary on_click=download>
                    {icon("download")}
                    " Descargar documento"
                </Button>
            </Show>
            {move || download_error.get().map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{CounterpartyRef, DetailLine, ProductRef};

    fn line(name: &str, quantity: f64, price: f64) -> DetailLine {
        DetailLine {
            id: None,
            product: ProductRef {
                id: None,
                name: name.to_string(),
            },
            quantity,
            unit_price: price,
            total: None,
        }
    }

    #[test]
    fn test_csv_cells() {
        let record = TransactionRecord {
            id: 1,
            order_number: "0000021".into(),
            date: Some("2025-02-03T08:00:00".into()),
            counterparty: CounterpartyRef {
                name: "Ferretería Lima".into(),
                document: Some("20100000001".into()),
                ..Default::default()
            },
            seller: None,
            lines: vec![line("Cemento", 2.0, 30.0), line("Clavos", 1.0, 4.5)],
        };
        assert_eq!(
            history_csv_cells(&record),
            vec![
                "0000021",
                "03/02/2025",
                "Ferretería Lima",
                "20100000001",
                "2",
                "64.50",
                "Completada",
            ]
        );
        assert_eq!(items_summary(&record), "Cemento y 1 más");
        assert_eq!(history_headers("Proveedor")[2], "Proveedor");
    }

    #[test]
    fn test_csv_cells_without_lines() {
        let record = TransactionRecord {
            id: 2,
            order_number: "0000022".into(),
            date: None,
            counterparty: CounterpartyRef {
                name: "Mostrador".into(),
                ..Default::default()
            },
            seller: None,
            lines: vec![],
        };
        let cells = history_csv_cells(&record);
        assert_eq!(cells[3], "-");
        assert_eq!(cells[4], "0");
        assert_eq!(cells[5], "0.00");
        assert_eq!(items_summary(&record), "-");
    }
}
