use crate::domain::a006_purchase::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::history_table::{history_csv_cells, history_headers, HistoryTable};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::today_iso;
use crate::shared::export::{export_to_excel, ExcelExportable};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::record_browser::RecordBrowser;
use crate::system::auth::context::use_auth;
use contracts::domain::common::TransactionRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

struct PurchaseExportRow(TransactionRecord);

impl ExcelExportable for PurchaseExportRow {
    fn headers() -> Vec<&'static str> {
        history_headers("Proveedor")
    }

    fn to_csv_row(&self) -> Vec<String> {
        history_csv_cells(&self.0)
    }
}

#[component]
pub fn PurchaseList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let browser = RwSignal::new(RecordBrowser::<TransactionRecord>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (export_error, set_export_error) = signal(None::<String>);
    let search = RwSignal::new(String::new());

    let load = move || {
        set_is_loading.set(true);
        let client = auth.client();
        spawn_local(async move {
            let result = api::fetch_purchases(&client).await;
            if let Err(e) = &result {
                auth.report(e);
            }
            browser.update(|b| b.load(result));
            set_is_loading.set(false);
        });
    };

    load();

    let on_search = Callback::new(move |text: String| {
        search.set(text.clone());
        browser.update(|b| b.set_search(text));
    });

    let export = move |_| {
        let rows: Vec<PurchaseExportRow> = browser.with_untracked(|b| {
            b.export_rows().iter().cloned().map(PurchaseExportRow).collect()
        });
        let filename = format!("compras_{}.csv", today_iso());
        set_export_error.set(export_to_excel(&rows, &filename).err());
    };

    let open_detail = Callback::new(move |record: TransactionRecord| {
        ctx.open_tab(
            &format!("a006_purchase_detail_{}", record.id),
            &detail_tab_label("Compra", &record.order_number),
        );
    });

    view! {
        <PageFrame page_id="a006_purchase--list" category=PAGE_CAT_LIST>
            <PageHeader title="Historial de compras">
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || browser.with(|b| b.total_count()).to_string()}
                </Badge>
                <Button appearance=ButtonAppearance::Primary on_click=export>
                    {icon("download")}
                    " Exportar Excel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || is_loading.get())
                >
                    "Actualizar"
                </Button>
            </PageHeader>

            {move || {
                browser
                    .with(|b| b.error().map(str::to_string))
                    .or_else(|| export_error.get())
                    .map(|e| view! {
                        <div class="warning-box warning-box--error">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{e}</span>
                        </div>
                    })
            }}

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <SearchInput
                        value=search
                        on_change=on_search
                        placeholder="Buscar por proveedor, orden o producto..."
                    />
                    <select
                        class="form__input"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            browser.update(|b| b.set_counterparty_filter(Some(value)));
                        }
                    >
                        <option value="">"Todos los proveedores"</option>
                        {move || browser.with(|b| b.counterparty_options()).into_iter().map(|name| {
                            let label = name.clone();
                            view! { <option value=name>{label}</option> }
                        }).collect_view()}
                    </select>
                </Flex>
                <PaginationControls
                    current_page=Signal::derive(move || browser.with(|b| b.page()))
                    total_pages=Signal::derive(move || browser.with(|b| b.page_count()))
                    range=Signal::derive(move || browser.with(|b| b.visible_range()))
                    on_page_change=Callback::new(move |page| browser.update(|b| b.go_to_page(page)))
                />
            </div>

            <div class="page__content">
                <HistoryTable
                    rows=Signal::derive(move || browser.with(|b| b.page_rows()))
                    counterparty_label="Proveedor"
                    on_open=open_detail
                />
                <Show when=move || browser.with(|b| b.is_loaded() && b.filtered_count() == 0)>
                    <div class="table__empty">"No se encontraron compras"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::build_csv;
    use contracts::domain::common::CounterpartyRef;

    #[test]
    fn test_export_uses_provider_column() {
        let record = TransactionRecord {
            id: 1,
            order_number: "0000001".into(),
            date: Some("2024-01-05".into()),
            counterparty: CounterpartyRef {
                name: "Distribuidora Norte".into(),
                ..Default::default()
            },
            seller: None,
            lines: vec![],
        };
        let csv = build_csv(&[PurchaseExportRow(record)]);
        assert!(csv.starts_with("\u{FEFF}Orden;Fecha;Proveedor;Documento;Productos;Total;Estado\n"));
        assert!(csv.contains("0000001;05/01/2024;Distribuidora Norte;-;0;0.00;Completada"));
    }
}
