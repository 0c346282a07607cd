use crate::dashboards::d400_overview::counts::CountsContext;
use crate::domain::a001_unit_type::api::fetch_unit_types;
use crate::domain::a002_product::api;
use crate::domain::a004_provider::api::fetch_providers;
use crate::shared::api_utils::api_url;
use crate::shared::error::AppError;
use crate::system::auth::context::AuthContext;
use contracts::domain::a001_unit_type::aggregate::UnitType;
use contracts::domain::a002_product::aggregate::ProductForm;
use contracts::domain::a004_provider::aggregate::Provider;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductForm>,
    pub unit_types: RwSignal<Vec<UnitType>>,
    pub providers: RwSignal<Vec<Provider>>,
    /// Newly picked image, sent with the next save
    pub image: StoredValue<Option<File>, LocalStorage>,
    pub image_name: RwSignal<Option<String>>,
    /// Image already stored on the server
    pub image_url: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductForm::default()),
            unit_types: RwSignal::new(Vec::new()),
            providers: RwSignal::new(Vec::new()),
            image: StoredValue::new_local(None),
            image_name: RwSignal::new(None),
            image_url: RwSignal::new(None),
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

    /// Load lookups, and the product itself when editing
    pub fn load(&self, auth: AuthContext, id: Option<i64>) {
        let this = *self;
        let client = auth.client();
        let is_admin = auth.session.with_untracked(|s| s.is_admin());
        spawn_local(async move {
            match fetch_unit_types(&client).await {
                Ok(units) => this.unit_types.set(units),
                Err(e) => this.error.set(Some(auth.report(&e))),
            }
            // Provider list is administrator data
            if is_admin {
                match fetch_providers(&client).await {
                    Ok(providers) => this.providers.set(providers),
                    Err(e) => this.error.set(Some(auth.report(&e))),
                }
            }
            if let Some(id) = id {
                match api::fetch_product(&client, id).await {
                    Ok(product) => {
                        this.image_url.set(product.image.as_deref().map(image_src));
                        this.form.set(ProductForm::from_product(&product));
                    }
                    Err(e) => this.error.set(Some(format!("Error al cargar: {}", auth.report(&e)))),
                }
            }
        });
    }

    pub fn pick_image(&self, file: Option<File>) {
        self.image_name.set(file.as_ref().map(|f| f.name()));
        self.image.set_value(file);
    }

    pub fn save_command(&self, auth: AuthContext, counts: CountsContext, on_saved: Callback<()>) {
        let current = self.form.get_untracked();
        if let Some(field) = current.first_invalid_field() {
            self.error.set(Some(AppError::required(field).user_message()));
            return;
        }

        let this = *self;
        let image = self.image.get_value();
        let client = auth.client();
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::save_product(&client, &current, image).await {
                Ok(saved) => {
                    log::info!("product {} saved", saved.id);
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

impl Default for ProductDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute URL of a stored image path
fn image_src(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        api_url(path)
    }
}
