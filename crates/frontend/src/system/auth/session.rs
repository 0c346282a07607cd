//! Session Manager: single writer of the bearer token and the resolved identity.
//!
//! Every token change is mirrored to the [`TokenStore`] before the in-memory
//! state is touched. Identity resolution runs outside the manager; its result is
//! handed back through [`SessionManager::complete`], which drops it when the
//! session generation moved on in the meantime (logout, second login).

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use contracts::system::auth::{Role, UserInfo};

use super::storage::TokenStore;
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Uninitialized,
    Resolving,
    Ready,
}

/// Snapshot of who the current actor is.
///
/// `user` is `Some` only when `status == Ready` and `token` is `Some`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    pub status: SessionStatus,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Administrator)
    }

    fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
            status: SessionStatus::Ready,
        }
    }
}

/// Turns a token into an identity (`GET auth/me` in the browser)
#[async_trait(?Send)]
pub trait IdentityResolver {
    async fn resolve(&self, token: &str) -> Result<UserInfo, AppError>;
}

/// Ticket for one identity resolution, valid only for the generation it was issued in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResolution {
    pub token: String,
    generation: u64,
}

pub type SubscriptionId = u64;

type Listener = Rc<dyn Fn(&Session)>;

struct Inner {
    session: Session,
    generation: u64,
    store: Rc<dyn TokenStore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

/// Cloneable handle; all clones share one session
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<RefCell<Inner>>,
}

impl SessionManager {
    pub fn new(store: Rc<dyn TokenStore>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                session: Session::default(),
                generation: 0,
                store,
                listeners: Vec::new(),
                next_subscription: 1,
            })),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.borrow().session.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.borrow().session.token.clone()
    }

    /// Restore the persisted token at startup.
    ///
    /// Returns the resolution to run when a token was found; otherwise the
    /// session becomes `Ready` and anonymous right away.
    pub fn hydrate(&self) -> Option<PendingResolution> {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            let persisted = inner.store.load();
            inner.generation += 1;
            match persisted {
                Some(token) => {
                    inner.session = Session {
                        token: Some(token.clone()),
                        user: None,
                        status: SessionStatus::Resolving,
                    };
                    Some(PendingResolution {
                        token,
                        generation: inner.generation,
                    })
                }
                None => {
                    inner.session = Session::anonymous();
                    None
                }
            }
        };
        log::debug!("session hydrated, resolving: {}", pending.is_some());
        self.notify();
        pending
    }

    /// Install a freshly issued token. The caller runs the returned resolution.
    pub fn login(&self, token: impl Into<String>) -> PendingResolution {
        let token = token.into();
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.store.save(&token);
            inner.generation += 1;
            inner.session = Session {
                token: Some(token.clone()),
                user: None,
                status: SessionStatus::Resolving,
            };
            PendingResolution {
                token,
                generation: inner.generation,
            }
        };
        log::debug!("session login, generation {}", pending.generation);
        self.notify();
        pending
    }

    /// Drop token and identity at once; in-flight resolutions become stale.
    pub fn logout(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.store.clear();
            inner.generation += 1;
            inner.session = Session::anonymous();
            log::debug!("session logout, generation {}", inner.generation);
        }
        self.notify();
    }

    /// Apply the outcome of a resolution. Returns `false` when it was stale.
    pub fn complete(
        &self,
        pending: &PendingResolution,
        result: Result<UserInfo, AppError>,
    ) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.generation != pending.generation {
                log::warn!(
                    "discarding identity resolution of generation {} (current {})",
                    pending.generation,
                    inner.generation
                );
                return false;
            }
            match result {
                Ok(user) => {
                    log::info!("signed in as {} ({})", user.email, user.role.as_str());
                    inner.session = Session {
                        token: Some(pending.token.clone()),
                        user: Some(user),
                        status: SessionStatus::Ready,
                    };
                }
                Err(err) => {
                    log::warn!("identity resolution failed: {}", err);
                    inner.store.clear();
                    inner.session = Session::anonymous();
                }
            }
        }
        self.notify();
        true
    }

    /// Fetch the identity for `pending` and apply it
    pub async fn resolve(
        &self,
        pending: PendingResolution,
        resolver: &dyn IdentityResolver,
    ) -> bool {
        let result = resolver.resolve(&pending.token).await;
        self.complete(&pending, result)
    }

    /// Screens hand their failures here; an authentication failure ends the session.
    pub fn report(&self, error: &AppError) -> bool {
        if error.is_authentication() && self.token().is_some() {
            log::warn!("token rejected by the API, signing out");
            self.logout();
            return true;
        }
        false
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscription;
        inner.next_subscription += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&self) {
        // Listeners may read the manager again, so no borrow is held while they run
        let (snapshot, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.session.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryTokenStore;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn user(role: Role) -> UserInfo {
        UserInfo {
            id: 7,
            given_name: "Ana".into(),
            family_names: "Quispe".into(),
            email: "ana@tienda.pe".into(),
            role,
            active: true,
        }
    }

    struct FixedResolver(Result<UserInfo, AppError>);

    #[async_trait(?Send)]
    impl IdentityResolver for FixedResolver {
        async fn resolve(&self, _token: &str) -> Result<UserInfo, AppError> {
            self.0.clone()
        }
    }

    /// Completes only when the test sends the identity through the channel
    struct GatedResolver {
        rx: RefCell<Option<oneshot::Receiver<UserInfo>>>,
    }

    #[async_trait(?Send)]
    impl IdentityResolver for GatedResolver {
        async fn resolve(&self, _token: &str) -> Result<UserInfo, AppError> {
            let rx = self.rx.borrow_mut().take().expect("resolver used twice");
            rx.await
                .map_err(|_| AppError::Network("cancelled".to_string()))
        }
    }

    fn manager_with(store: Rc<MemoryTokenStore>) -> SessionManager {
        SessionManager::new(store)
    }

    #[test]
    fn test_hydrate_without_token_is_ready_anonymous() {
        let manager = manager_with(Rc::new(MemoryTokenStore::default()));
        assert_eq!(manager.snapshot().status, SessionStatus::Uninitialized);
        assert!(manager.hydrate().is_none());
        assert_eq!(manager.snapshot(), Session::anonymous());
    }

    #[test]
    fn test_hydrate_with_token_resolves_identity() {
        let store = Rc::new(MemoryTokenStore::with_token("persisted"));
        let manager = manager_with(store.clone());

        let pending = manager.hydrate().expect("token present");
        assert_eq!(pending.token, "persisted");
        assert_eq!(manager.snapshot().status, SessionStatus::Resolving);

        let applied = block_on(manager.resolve(pending, &FixedResolver(Ok(user(Role::Worker)))));
        assert!(applied);
        let session = manager.snapshot();
        assert_eq!(session.status, SessionStatus::Ready);
        assert_eq!(session.token.as_deref(), Some("persisted"));
        assert_eq!(session.role(), Some(Role::Worker));
    }

    #[test]
    fn test_login_persists_before_resolution() {
        let store = Rc::new(MemoryTokenStore::default());
        let manager = manager_with(store.clone());

        manager.login("fresh");
        assert_eq!(store.current().as_deref(), Some("fresh"));
        let session = manager.snapshot();
        assert_eq!(session.status, SessionStatus::Resolving);
        assert_eq!(session.token.as_deref(), Some("fresh"));
        assert!(session.user.is_none());
    }

    #[test]
    fn test_failed_resolution_clears_token_everywhere() {
        let store = Rc::new(MemoryTokenStore::with_token("expired"));
        let manager = manager_with(store.clone());

        let pending = manager.hydrate().expect("token present");
        let resolver = FixedResolver(Err(AppError::Authentication("expired".into())));
        assert!(block_on(manager.resolve(pending, &resolver)));

        assert_eq!(manager.snapshot(), Session::anonymous());
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_logout_during_resolution_stays_anonymous() {
        let store = Rc::new(MemoryTokenStore::default());
        let manager = manager_with(store.clone());
        let (tx, rx) = oneshot::channel();
        let resolver = GatedResolver {
            rx: RefCell::new(Some(rx)),
        };

        let pending = manager.login("racing");
        let (applied, ()) = block_on(async {
            futures::join!(manager.resolve(pending, &resolver), async {
                manager.logout();
                let _ = tx.send(user(Role::Administrator));
            })
        });

        assert!(!applied);
        let session = manager.snapshot();
        assert_eq!(session.user, None);
        assert_eq!(session.token, None);
        assert_eq!(store.current(), None);
    }

    #[test]
    fn test_second_login_discards_first_resolution() {
        let manager = manager_with(Rc::new(MemoryTokenStore::default()));
        let first = manager.login("first");
        let second = manager.login("second");

        assert!(!manager.complete(&first, Ok(user(Role::Administrator))));
        assert!(manager.complete(&second, Ok(user(Role::Worker))));
        assert_eq!(manager.snapshot().role(), Some(Role::Worker));
        assert_eq!(manager.token().as_deref(), Some("second"));
    }

    #[test]
    fn test_report_authentication_error_signs_out() {
        let manager = manager_with(Rc::new(MemoryTokenStore::default()));
        let pending = manager.login("tok");
        manager.complete(&pending, Ok(user(Role::Worker)));

        assert!(!manager.report(&AppError::Network("offline".into())));
        assert!(manager.snapshot().is_authenticated());

        assert!(manager.report(&AppError::Authentication("expired".into())));
        assert!(!manager.snapshot().is_authenticated());
        assert_eq!(manager.token(), None);
    }

    #[test]
    fn test_subscribers_see_every_transition() {
        let manager = manager_with(Rc::new(MemoryTokenStore::default()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = manager.subscribe(move |s| sink.borrow_mut().push(s.status));

        let pending = manager.login("tok");
        manager.complete(&pending, Ok(user(Role::Worker)));
        assert_eq!(
            *seen.borrow(),
            vec![SessionStatus::Resolving, SessionStatus::Ready]
        );

        manager.unsubscribe(id);
        manager.logout();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_listener_may_read_manager() {
        let manager = manager_with(Rc::new(MemoryTokenStore::default()));
        let reads = Rc::new(Cell::new(0));
        let handle = manager.clone();
        let counter = reads.clone();
        manager.subscribe(move |_| {
            let _ = handle.snapshot();
            counter.set(counter.get() + 1);
        });
        manager.logout();
        assert_eq!(reads.get(), 1);
    }
}
