use crate::domain::a005_sale::api;
use crate::shared::components::history_table::TransactionDetailBody;
use crate::shared::composer::TransactionKind;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_auth;
use contracts::domain::common::TransactionRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Stored sale (`GET ventas/{id}`)
#[component]
pub fn SaleDetail(id: i64, on_close: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let (record, set_record) = signal(None::<TransactionRecord>);
    let (error, set_error) = signal(None::<String>);

    let client = auth.client();
    spawn_local(async move {
        match api::fetch_sale(&client, id).await {
            Ok(found) => set_record.set(Some(found)),
            Err(e) => set_error.set(Some(auth.report(&e))),
        }
    });

    view! {
        <PageFrame page_id="a005_sale--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title="Detalle de venta">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    {icon("close")}
                    " Cerrar"
                </Button>
            </PageHeader>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            <div class="page__content">
                {move || match record.get() {
                    Some(r) => view! { <TransactionDetailBody record=r kind=TransactionKind::Sale /> }.into_any(),
                    None if error.get().is_none() => view! { <Spinner /> }.into_any(),
                    None => ().into_any(),
                }}
            </div>
        </PageFrame>
    }
}
