use leptos::prelude::*;

/// Labelled text input bound to one string field of a form signal
#[component]
pub fn FormField<F>(
    label: &'static str,
    form: RwSignal<F>,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
    /// `text` when empty
    #[prop(optional)]
    input_type: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] readonly: MaybeProp<bool>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView
where
    F: Send + Sync + 'static,
{
    let input_type = if input_type.is_empty() { "text" } else { input_type };
    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <input
                class="form__input"
                type=input_type
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                readonly=move || readonly.get().unwrap_or(false)
            />
        </div>
    }
}
