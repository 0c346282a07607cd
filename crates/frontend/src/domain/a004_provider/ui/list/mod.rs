use crate::domain::a004_provider::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::icons::icon;
use crate::shared::list_utils::{contains_ci, filter_list, SearchInput, Searchable};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use contracts::domain::a004_provider::aggregate::Provider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ProviderRow {
    pub id: i64,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
}

impl From<Provider> for ProviderRow {
    fn from(p: Provider) -> Self {
        let or_dash =
            |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string());
        Self {
            id: p.id,
            name: p.name,
            document: or_dash(p.document),
            phone: or_dash(p.phone),
            email: or_dash(p.email),
        }
    }
}

impl Searchable for ProviderRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter) || contains_ci(&self.document, filter)
    }
}

#[component]
pub fn ProviderList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let (items, set_items) = signal(Vec::<ProviderRow>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let search = RwSignal::new(String::new());

    let load = move || {
        set_is_loading.set(true);
        set_error.set(None);
        let client = auth.client();
        spawn_local(async move {
            match api::fetch_providers(&client).await {
                Ok(providers) => set_items.set(providers.into_iter().map(Into::into).collect()),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
            set_is_loading.set(false);
        });
    };

    load();

    let visible = Memo::new(move |_| items.with(|rows| filter_list(rows, &search.get())));

    view! {
        <PageFrame page_id="a004_provider--list" category=PAGE_CAT_LIST>
            <PageHeader title="Proveedores">
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || items.with(|i| i.len()).to_string()}
                </Badge>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open_tab("a004_provider_new", &tab_label_for_key("a004_provider_new"))
                >
                    {icon("plus")}
                    " Nuevo proveedor"
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
                    placeholder="Buscar por nombre o documento..."
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
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|row| {
                            let tab_key = format!("a004_provider_detail_{}", row.id);
                            let tab_title = detail_tab_label("Proveedor", &row.name);
                            view! {
                                <TableRow
                                    on:click=move |_| ctx.open_tab(&tab_key, &tab_title)
                                    attr:style="cursor: pointer;"
                                >
                                    <TableCell><TableCellLayout>{row.name}</TableCellLayout></TableCell>
                                    <TableCell>{row.document}</TableCell>
                                    <TableCell>{row.phone}</TableCell>
                                    <TableCell>{row.email}</TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || visible.with(|v| v.is_empty()) && !is_loading.get()>
                    <div class="table__empty">"No se encontraron proveedores"</div>
                </Show>
            </div>
        </PageFrame>
    }
}
