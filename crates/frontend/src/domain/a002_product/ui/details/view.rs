use super::view_model::ProductDetailsViewModel;
use crate::dashboards::d400_overview::counts::use_counts;
use crate::shared::components::form_field::FormField;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_product::aggregate::ProductForm;
use leptos::prelude::*;
use thaw::*;
use web_sys::HtmlInputElement;

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

#[component]
pub fn ProductDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let counts = use_counts();
    let vm = ProductDetailsViewModel::new();
    vm.load(auth, id);

    let readonly = Signal::derive(move || !auth.session.with(|s| s.is_admin()));
    let form = vm.form;

    let title = if id.is_some() { "Producto" } else { "Nuevo producto" };

    view! {
        <PageFrame page_id="a002_product--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=title>
                <Show when=move || !readonly.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save_command(auth, counts, on_saved)
                        disabled=Signal::derive(move || vm.saving.get() || !vm.is_form_valid())
                    >
                        {move || if vm.is_edit_mode() { "Guardar" } else { "Crear" }}
                    </Button>
                </Show>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("close")}
                    " Cerrar"
                </Button>
            </PageHeader>

            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="page__content details-form">
                <FormField label="Nombre" required=true form=form readonly=readonly
                    get=|f: &ProductForm| f.name.clone() set=|f: &mut ProductForm, v: String| f.name = v />
                <div class="form__group">
                    <label class="form__label">"Descripción"</label>
                    <textarea
                        class="form__input"
                        rows="3"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        readonly=move || readonly.get()
                    />
                </div>
                <FormField label="Precio de compra" input_type="number" form=form readonly=readonly
                    get=|f: &ProductForm| f.purchase_price.clone() set=|f: &mut ProductForm, v: String| f.purchase_price = v />
                <FormField label="Precio de venta" input_type="number" required=true form=form readonly=readonly
                    get=|f: &ProductForm| f.sale_price.clone() set=|f: &mut ProductForm, v: String| f.sale_price = v />
                <FormField label="Stock" input_type="number" required=true form=form readonly=readonly
                    get=|f: &ProductForm| f.stock.clone() set=|f: &mut ProductForm, v: String| f.stock = v />

                <div class="form__group">
                    <label class="form__label">"Tipo de unidad"</label>
                    <select
                        class="form__input"
                        disabled=move || readonly.get()
                        on:change=move |ev| form.update(|f| f.unit_type_id = parse_id(&event_target_value(&ev)))
                    >
                        <option value="" selected=move || form.with(|f| f.unit_type_id.is_none())>"Sin unidad"</option>
                        {move || vm.unit_types.get().into_iter().map(|unit| {
                            let unit_id = unit.id;
                            view! {
                                <option
                                    value=unit_id.to_string()
                                    selected=move || form.with(|f| f.unit_type_id == Some(unit_id))
                                >
                                    {unit.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>

                <Show when=move || !readonly.get()>
                    <div class="form__group">
                        <label class="form__label">"Proveedor"</label>
                        <select
                            class="form__input"
                            on:change=move |ev| form.update(|f| f.provider_id = parse_id(&event_target_value(&ev)))
                        >
                            <option value="" selected=move || form.with(|f| f.provider_id.is_none())>"Sin proveedor"</option>
                            {move || vm.providers.get().into_iter().map(|provider| {
                                let provider_id = provider.id;
                                view! {
                                    <option
                                        value=provider_id.to_string()
                                        selected=move || form.with(|f| f.provider_id == Some(provider_id))
                                    >
                                        {provider.name}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Imagen"</label>
                        <input
                            type="file"
                            accept="image/*"
                            on:change=move |ev| {
                                let file = event_target::<HtmlInputElement>(&ev)
                                    .files()
                                    .and_then(|files| files.get(0));
                                vm.pick_image(file);
                            }
                        />
                        {move || vm.image_name.get().map(|name| view! { <span class="text-muted">{name}</span> })}
                    </div>
                </Show>

                {move || vm.image_url.get().map(|src| view! {
                    <img class="details-form__image" src=src alt="Imagen del producto" />
                })}
            </div>
        </PageFrame>
    }
}
