use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::RemoteIdentityResolver;
use super::session::{PendingResolution, Session, SessionManager};
use super::storage::LocalStorageTokenStore;
use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;

/// Handles exposed to components: the manager (writer) and its signal mirror (reader)
#[derive(Clone, Copy)]
pub struct AuthContext {
    manager: StoredValue<SessionManager, LocalStorage>,
    pub session: RwSignal<Session>,
}

impl AuthContext {
    pub fn manager(&self) -> SessionManager {
        self.manager.get_value()
    }

    /// Install a new token and resolve its identity in the background
    pub fn sign_in(&self, token: String) {
        let manager = self.manager();
        let pending = manager.login(token);
        spawn_resolution(manager, pending);
    }

    pub fn sign_out(&self) {
        self.manager().logout();
    }

    /// Client carrying the current token
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.manager().token())
    }

    /// Route a screen failure to the session; returns the text to show inline
    pub fn report(&self, error: &AppError) -> String {
        self.manager().report(error);
        error.user_message()
    }
}

fn spawn_resolution(manager: SessionManager, pending: PendingResolution) {
    spawn_local(async move {
        manager.resolve(pending, &RemoteIdentityResolver).await;
    });
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let manager = SessionManager::new(Rc::new(LocalStorageTokenStore));
    let session = RwSignal::new(manager.snapshot());

    let subscription = manager.subscribe(move |snapshot| session.set(snapshot.clone()));

    // Restore session from localStorage on mount
    if let Some(pending) = manager.hydrate() {
        spawn_resolution(manager.clone(), pending);
    }

    let stored = StoredValue::new_local(manager);
    on_cleanup(move || {
        let _ = stored.try_with_value(|m| m.unsubscribe(subscription));
    });

    provide_context(AuthContext {
        manager: stored,
        session,
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

/// Reactive session snapshot
pub fn use_session() -> RwSignal<Session> {
    use_auth().session
}
