use crate::domain::a003_client::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::icons::icon;
use crate::shared::list_utils::{contains_ci, filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use contracts::domain::a003_client::aggregate::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

fn or_dash(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string())
}

impl From<Client> for ClientRow {
    fn from(c: Client) -> Self {
        let document = match (c.document_type.as_deref(), c.document.as_deref()) {
            (Some(kind), Some(doc)) if !kind.is_empty() && !doc.is_empty() => {
                format!("{} {}", kind, doc)
            }
            (_, Some(doc)) if !doc.is_empty() => doc.to_string(),
            _ => "-".to_string(),
        };
        Self {
            id: c.id,
            name: c.name,
            document,
            phone: or_dash(c.phone),
            email: or_dash(c.email),
            address: or_dash(c.address),
        }
    }
}

impl Searchable for ClientRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.document, filter)
            || contains_ci(&self.email, filter)
    }
}

#[component]
pub fn ClientList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let (items, set_items) = signal(Vec::<ClientRow>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let search = RwSignal::new(String::new());

    let load = move || {
        set_is_loading.set(true);
        set_error.set(None);
        let client = auth.client();
        spawn_local(async move {
            match api::fetch_clients(&client).await {
                Ok(clients) => set_items.set(clients.into_iter().map(Into::into).collect()),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
            set_is_loading.set(false);
        });
    };

    load();

    let visible = Memo::new(move |_| items.with(|rows| filter_list(rows, &search.get())));

    view! {
        <PageFrame page_id="a003_client--list" category=PAGE_CAT_LIST>
            <PageHeader title="Clientes">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open_tab("a003_client_new", &tab_label_for_key("a003_client_new"))
                >
                    {icon("plus")}
                    " Nuevo cliente"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || is_loading.get())
                >
                    "Actualizar"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-panel">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v| search.set(v))
                    placeholder="Buscar por nombre, documento o correo..."
                />
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=220.0>"Nombre"</TableHeaderCell>
                            <TableHeaderCell>"Documento"</TableHeaderCell>
                            <TableHeaderCell>"Teléfono"</TableHeaderCell>
                            <TableHeaderCell>"Correo"</TableHeaderCell>
                            <TableHeaderCell>"Dirección"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|row| {
                            let tab_key = format!("a003_client_detail_{}", row.id);
                            let tab_title = detail_tab_label("Cliente", &row.name);
                            view! {
                                <TableRow
                                    on:click=move |_| ctx.open_tab(&tab_key, &tab_title)
                                    attr:style="cursor: pointer;"
                                >
                                    <TableCell><TableCellLayout>{row.name}</TableCellLayout></TableCell>
                                    <TableCell>{row.document}</TableCell>
                                    <TableCell>{row.phone}</TableCell>
                                    <TableCell>{row.email}</TableCell>
                                    <TableCell>{row.address}</TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || visible.with(|v| v.is_empty()) && !is_loading.get()>
                    <div class="table__empty">"No se encontraron clientes"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_document_and_search() {
        let row: ClientRow = Client {
            id: 4,
            name: "Bodega Lucía".into(),
            address: None,
            phone: Some(String::new()),
            email: Some("lucia@bodega.pe".into()),
            document: Some("20481234567".into()),
            document_type: Some("RUC".into()),
        }
        .into();
        assert_eq!(row.document, "RUC 20481234567");
        assert_eq!(row.phone, "-");
        assert!(row.matches_filter("2048"));
        assert!(row.matches_filter("lucia@"));
        assert!(!row.matches_filter("ferretería"));
    }
}
