mod state;

use contracts::system::auth::Role;
use contracts::system::users::{User, UserForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::UserEditor;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::confirm::confirm_action;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use state::create_state;

fn toggle_question(user: &User) -> String {
    format!(
        "¿Está seguro de que desea {} al usuario {}?",
        if user.is_active { "desactivar" } else { "activar" },
        user.full_name()
    )
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    let auth = use_auth();
    let state = create_state();
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let search = RwSignal::new(String::new());
    // Some(form) while the editor is open
    let editor = RwSignal::new(None::<RwSignal<UserForm>>);

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let client = auth.client();
        spawn_local(async move {
            match api::fetch_users(&client).await {
                Ok(data) => state.update(|s| {
                    s.all = data;
                    s.is_loaded = true;
                }),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
            set_loading.set(false);
        });
    };

    load_data();

    let on_search = Callback::new(move |text: String| {
        search.set(text.clone());
        state.update(|s| s.search_query = text);
    });

    let on_sort = Callback::new(move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
        });
    });

    let open_editor = move |form: UserForm| editor.set(Some(RwSignal::new(form)));

    let on_saved = Callback::new(move |user: User| {
        state.update(|s| s.replace(user));
        editor.set(None);
    });
    let on_cancel = Callback::new(move |_: ()| editor.set(None));

    // The row only changes once the server confirms
    let toggle = move |user: User| {
        if !confirm_action(&toggle_question(&user)) {
            return;
        }
        let client = auth.client();
        spawn_local(async move {
            match api::toggle_status(&client, user.id).await {
                Ok(updated) => state.update(|s| s.replace(updated)),
                Err(e) => set_error.set(Some(auth.report(&e))),
            }
        });
    };

    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.sort_ascending));

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Usuarios">
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || state.with(|s| s.all.len()).to_string()}
                </Badge>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_editor(UserForm::default())
                >
                    {icon("plus")}
                    " Nuevo usuario"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_data()
                    disabled=Signal::derive(move || loading.get())
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

            {move || editor.get().map(|form| view! {
                <UserEditor form=form on_saved=on_saved on_cancel=on_cancel />
            })}

            <div class="filter-panel">
                <SearchInput
                    value=search
                    on_change=on_search
                    placeholder="Buscar por nombre, correo o rol..."
                />
            </div>

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <SortableHeaderCell label="Nombre" sort_field="name"
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=200.0 />
                            <SortableHeaderCell label="Correo" sort_field="email"
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=200.0 />
                            <SortableHeaderCell label="Rol" sort_field="role"
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=120.0 />
                            <SortableHeaderCell label="Estado" sort_field="is_active"
                                current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=100.0 />
                            <TableHeaderCell min_width=180.0>"Acciones"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || state.with(|s| s.visible()).into_iter().map(|user| {
                            let for_edit = user.clone();
                            let (status_color, status_text) = if user.is_active {
                                (BadgeColor::Success, "Activo")
                            } else {
                                (BadgeColor::Danger, "Inactivo")
                            };
                            let role_color = match user.role {
                                Role::Administrator => BadgeColor::Brand,
                                _ => BadgeColor::Informative,
                            };
                            let toggle_label = if user.is_active { "Desactivar" } else { "Activar" };
                            let full_name = user.full_name();
                            let email = user.email.clone();
                            let role_label = user.role.label();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{full_name}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{email}</TableCell>
                                    <TableCell>
                                        <Badge appearance=BadgeAppearance::Tint color=role_color>
                                            {role_label}
                                        </Badge>
                                    </TableCell>
                                    <TableCell>
                                        <Badge appearance=BadgeAppearance::Tint color=status_color>
                                            {status_text}
                                        </Badge>
                                    </TableCell>
                                    <TableCell>
                                        <Flex gap=FlexGap::Small>
                                            <Button
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| open_editor(UserForm::from_user(&for_edit))
                                            >
                                                "Editar"
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| toggle(user.clone())
                                            >
                                                {toggle_label}
                                            </Button>
                                        </Flex>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <Show when=move || state.with(|s| s.is_loaded && s.visible().is_empty())>
                    <div class="table__empty">"No se encontraron usuarios"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_question_names_the_action() {
        let user = User {
            id: 3,
            given_name: "Luis".into(),
            family_names: "Rojas".into(),
            email: "luis@tienda.pe".into(),
            role: Role::Worker,
            is_active: true,
        };
        assert_eq!(
            toggle_question(&user),
            "¿Está seguro de que desea desactivar al usuario Luis Rojas?"
        );
    }
}
