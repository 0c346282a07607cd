use crate::dashboards::d400_overview::counts::CountsContext;
use crate::domain::a003_client::api;
use crate::shared::error::AppError;
use crate::system::auth::context::AuthContext;
use contracts::domain::a003_client::aggregate::ClientForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Document kinds offered by the form
pub const DOCUMENT_TYPES: &[&str] = &["DNI", "RUC", "CE", "Pasaporte"];

#[derive(Clone, Copy)]
pub struct ClientDetailsViewModel {
    pub form: RwSignal<ClientForm>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ClientDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ClientForm {
                document_type: DOCUMENT_TYPES[0].to_string(),
                ..Default::default()
            }),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.id.is_some())
    }

    pub fn is_form_valid(&self) -> bool {
        self.form.with(|f| f.first_invalid_field().is_none())
    }

    pub fn load_if_needed(&self, auth: AuthContext, id: Option<i64>) {
        let Some(id) = id else {
            return;
        };
        let this = *self;
        let client = auth.client();
        spawn_local(async move {
            match api::fetch_client(&client, id).await {
                Ok(found) => this.form.set(ClientForm::from_client(&found)),
                Err(e) => this.error.set(Some(format!("Error al cargar: {}", auth.report(&e)))),
            }
        });
    }

    pub fn save_command(&self, auth: AuthContext, counts: CountsContext, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Some(field) = current.first_invalid_field() {
            self.error.set(Some(AppError::required(field).user_message()));
            return;
        }

        let this = *self;
        let client = auth.client();
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::save_client(&client, &current).await {
                Ok(saved) => {
                    log::info!("client {} saved", saved.id);
                    if current.id.is_none() {
                        counts.refresh(auth);
                    }
                    on_saved.run(());
                }
                Err(e) => this.error.set(Some(auth.report(&e))),
            }
            this.saving.set(false);
        });
    }
}

impl Default for ClientDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
