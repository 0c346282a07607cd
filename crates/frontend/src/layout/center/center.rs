use super::tab_strip::TabStrip;
use leptos::prelude::*;

/// Content zone: tab strip on top, tab pages below
#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <TabStrip />
            <div class="tabs__content">
                {children()}
            </div>
        </div>
    }
}
