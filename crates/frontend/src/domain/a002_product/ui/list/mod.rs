use crate::domain::a002_product::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::components::table::{format_amount, SortableHeaderCell, TableCellMoney};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_product::aggregate::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

/// Stock at or below this is flagged
const LOW_STOCK: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub unit_type: String,
    pub sale_price: Option<f64>,
    pub purchase_price: Option<f64>,
    pub stock: u32,
}

impl From<Product> for ProductRow {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            unit_type: p.unit_type_name().to_string(),
            stock: p.available_stock(),
            name: p.name,
            sale_price: p.sale_price,
            purchase_price: p.purchase_price,
        }
    }
}

impl Searchable for ProductRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter) || contains_ci(&self.unit_type, filter)
    }
}

impl Sortable for ProductRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "stock" => self.stock.cmp(&other.stock),
            "sale_price" => self
                .sale_price
                .unwrap_or(0.0)
                .total_cmp(&other.sale_price.unwrap_or(0.0)),
            "unit_type" => self.unit_type.to_lowercase().cmp(&other.unit_type.to_lowercase()),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

/// Badge colour and text for a stock level
pub fn stock_badge(stock: u32) -> (BadgeColor, String) {
    match stock {
        0 => (BadgeColor::Danger, "Agotado".to_string()),
        n if n <= LOW_STOCK => (BadgeColor::Warning, n.to_string()),
        n => (BadgeColor::Success, n.to_string()),
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let is_admin = move || auth.session.with(|s| s.is_admin());

    let (items, set_items) = signal(Vec::<ProductRow>::new());
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let search = RwSignal::new(String::new());
    let sort = RwSignal::new(("name".to_string(), true));

    let load = move || {
        set_is_loading.set(true);
        set_error.set(None);
        let client = auth.client();
        spawn_local(async move {
            match api::fetch_products(&client).await {
                Ok(products) => set_items.set(products.into_iter().map(Into::into).collect()),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
            set_is_loading.set(false);
        });
    };

    load();

    let visible = Memo::new(move |_| {
        let mut rows = items.with(|rows| filter_list(rows, &search.get()));
        sort.with(|(field, ascending)| sort_list(&mut rows, field, *ascending));
        rows
    });

    let toggle_sort = move |field: &'static str| {
        sort.update(|(current, ascending)| {
            if current == field {
                *ascending = !*ascending;
            } else {
                *current = field.to_string();
                *ascending = true;
            }
        });
    };

    let open_detail = move |row: &ProductRow| {
        ctx.open_tab(
            &format!("a002_product_detail_{}", row.id),
            &detail_tab_label("Producto", &row.name),
        );
    };

    let sort_field = Signal::derive(move || sort.get().0);
    let sort_ascending = Signal::derive(move || sort.get().1);

    view! {
        <PageFrame page_id="a002_product--list" category=PAGE_CAT_LIST>
            <PageHeader title="Productos">
                <Show when=is_admin>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.open_tab("a002_product_new", &tab_label_for_key("a002_product_new"))
                    >
                        {icon("plus")}
                        " Nuevo producto"
                    </Button>
                </Show>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load()
                    disabled=Signal::derive(move || is_loading.get())
                >
                    {move || if is_loading.get() { "Cargando..." } else { "Actualizar" }}
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
                    placeholder="Buscar por nombre o unidad..."
                />
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("{} de {}", visible.with(|v| v.len()), items.with(|i| i.len()))}
                </Badge>
            </div>

            <div class="page__content">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Nombre" sort_field="name" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=Callback::new(toggle_sort) min_width=240.0 />
                            <SortableHeaderCell label="Unidad" sort_field="unit_type" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=Callback::new(toggle_sort) />
                            <SortableHeaderCell label="Precio venta" sort_field="sale_price" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=Callback::new(toggle_sort) />
                            <TableHeaderCell>"Precio compra"</TableHeaderCell>
                            <SortableHeaderCell label="Stock" sort_field="stock" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=Callback::new(toggle_sort) />
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || visible.get().into_iter().map(|row| {
                            let (color, stock_text) = stock_badge(row.stock);
                            let sale_price = row.sale_price;
                            let purchase_price = row.purchase_price.map(format_amount).unwrap_or_else(|| "—".to_string());
                            let row_for_click = row.clone();
                            view! {
                                <TableRow on:click=move |_| open_detail(&row_for_click) attr:style="cursor: pointer;">
                                    <TableCell>
                                        <TableCellLayout>{row.name}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{row.unit_type}</TableCell>
                                    <TableCellMoney value=Signal::derive(move || sale_price) show_currency=true />
                                    <TableCell class="text-right">{purchase_price}</TableCell>
                                    <TableCell>
                                        <Badge appearance=BadgeAppearance::Tint color=color>{stock_text}</Badge>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || visible.with(|v| v.is_empty()) && !is_loading.get()>
                    <div class="table__empty">"No se encontraron productos"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, stock: u32) -> ProductRow {
        ProductRow {
            id: 1,
            name: name.to_string(),
            unit_type: unit.to_string(),
            sale_price: Some(1.0),
            purchase_price: None,
            stock,
        }
    }

    #[test]
    fn test_search_matches_name_or_unit() {
        let rows = vec![row("Arroz", "Saco", 3), row("Aceite", "Botella", 9)];
        assert_eq!(filter_list(&rows, "bot").len(), 1);
        assert_eq!(filter_list(&rows, "ARROZ").len(), 1);
        assert_eq!(filter_list(&rows, "").len(), 2);
    }

    #[test]
    fn test_stock_badge_levels() {
        assert_eq!(stock_badge(0).1, "Agotado");
        assert!(matches!(stock_badge(5).0, BadgeColor::Warning));
        assert!(matches!(stock_badge(6).0, BadgeColor::Success));
    }
}
