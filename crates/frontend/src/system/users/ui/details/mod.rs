//! Inline create/edit panel of the users screen

use contracts::system::auth::Role;
use contracts::system::users::{User, UserForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::form_field::FormField;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::users::api;

#[component]
pub fn UserEditor(
    form: RwSignal<UserForm>,
    on_saved: Callback<User>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let (error, set_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);
    let is_edit = move || form.with(|f| f.id.is_some());

    let save = move |_| {
        let snapshot = form.get_untracked();
        set_error.set(None);
        set_saving.set(true);
        let client = auth.client();
        spawn_local(async move {
            match api::save_user(&client, &snapshot).await {
                Ok(user) => {
                    log::info!("user {} saved", user.id);
                    on_saved.run(user);
                }
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="details-panel">
            <h3 class="details-panel__title">
                {move || if is_edit() { "Editar usuario" } else { "Nuevo usuario" }}
            </h3>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="details-form">
                <FormField label="Nombre" required=true form=form
                    get=|f: &UserForm| f.given_name.clone() set=|f: &mut UserForm, v: String| f.given_name = v />
                <FormField label="Apellidos" required=true form=form
                    get=|f: &UserForm| f.family_names.clone() set=|f: &mut UserForm, v: String| f.family_names = v />
                <FormField label="Correo" required=true input_type="email" form=form
                    get=|f: &UserForm| f.email.clone() set=|f: &mut UserForm, v: String| f.email = v />

                <div class="form__group">
                    <label class="form__label">"Rol"</label>
                    <select
                        class="form__input"
                        on:change=move |ev| form.update(|f| f.role = Role::from_api(&event_target_value(&ev)))
                    >
                        {Role::ASSIGNABLE.into_iter().map(|role| view! {
                            <option
                                value=role.as_str()
                                selected=move || form.with(|f| f.role == role)
                            >
                                {role.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                <FormField
                    label="Contraseña"
                    input_type="password"
                    form=form
                    placeholder="Dejar vacío para mantener la actual"
                    get=|f: &UserForm| f.password.clone()
                    set=|f: &mut UserForm, v: String| f.password = v
                />
            </div>

            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if is_edit() { "Guardar" } else { "Crear usuario" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("close")}
                    " Cancelar"
                </Button>
            </Flex>
        </div>
    }
}
