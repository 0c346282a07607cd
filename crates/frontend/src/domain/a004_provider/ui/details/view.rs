use super::view_model::ProviderDetailsViewModel;
use crate::dashboards::d400_overview::counts::use_counts;
use crate::shared::components::form_field::FormField;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;
use contracts::domain::a004_provider::aggregate::ProviderForm;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProviderDetails(
    id: Option<i64>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let counts = use_counts();
    let vm = ProviderDetailsViewModel::new();
    vm.load_if_needed(auth, id);
    let form = vm.form;

    let title = if id.is_some() { "Editar proveedor" } else { "Nuevo proveedor" };

    view! {
        <PageFrame page_id="a004_provider--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=title>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_command(auth, counts, on_saved)
                    disabled=Signal::derive(move || vm.saving.get() || !vm.is_form_valid())
                >
                    {move || if vm.is_edit_mode() { "Guardar" } else { "Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("close")}
                    " Cancelar"
                </Button>
            </PageHeader>

            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="page__content details-form">
                <FormField label="Nombre" required=true form=form
                    get=|f: &ProviderForm| f.name.clone() set=|f: &mut ProviderForm, v: String| f.name = v />
                <FormField label="RUC / Documento" form=form
                    get=|f: &ProviderForm| f.document.clone() set=|f: &mut ProviderForm, v: String| f.document = v />
                <FormField label="Teléfono" input_type="tel" form=form
                    get=|f: &ProviderForm| f.phone.clone() set=|f: &mut ProviderForm, v: String| f.phone = v />
                <FormField label="Correo" input_type="email" form=form
                    get=|f: &ProviderForm| f.email.clone() set=|f: &mut ProviderForm, v: String| f.email = v />
                <FormField label="Dirección" form=form
                    get=|f: &ProviderForm| f.address.clone() set=|f: &mut ProviderForm, v: String| f.address = v />
            </div>
        </PageFrame>
    }
}
