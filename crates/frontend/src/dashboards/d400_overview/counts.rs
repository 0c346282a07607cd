//! Four independent collection counts for the overview cards and sidebar badges.
//!
//! Each count is fetched on its own and retried once; one failing endpoint
//! leaves only its own slot empty.

use async_trait::async_trait;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::IgnoredAny;

use crate::shared::api_utils::ApiClient;
use crate::shared::error::AppError;
use crate::system::auth::context::AuthContext;

/// Attempts per count (first try + one retry)
pub const RETRY_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountKind {
    Products,
    Providers,
    Clients,
    Sales,
}

impl CountKind {
    pub const ALL: [CountKind; 4] = [
        CountKind::Products,
        CountKind::Providers,
        CountKind::Clients,
        CountKind::Sales,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            CountKind::Products => "productos/",
            CountKind::Providers => "proveedores/",
            CountKind::Clients => "clientes/",
            CountKind::Sales => "ventas/",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountKind::Products => "Productos",
            CountKind::Providers => "Proveedores",
            CountKind::Clients => "Clientes",
            CountKind::Sales => "Ventas",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CountKind::Products => "products",
            CountKind::Providers => "suppliers",
            CountKind::Clients => "customers",
            CountKind::Sales => "sales",
        }
    }
}

#[async_trait(?Send)]
pub trait CountSource {
    async fn count(&self, kind: CountKind) -> Result<usize, AppError>;
}

/// Counts by listing each collection
pub struct RemoteCountSource {
    pub client: ApiClient,
}

#[async_trait(?Send)]
impl CountSource for RemoteCountSource {
    async fn count(&self, kind: CountKind) -> Result<usize, AppError> {
        let rows: Vec<IgnoredAny> = self.client.get_json(kind.endpoint()).await?;
        Ok(rows.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counts {
    pub products: Option<usize>,
    pub providers: Option<usize>,
    pub clients: Option<usize>,
    pub sales: Option<usize>,
}

impl Counts {
    pub fn get(&self, kind: CountKind) -> Option<usize> {
        match kind {
            CountKind::Products => self.products,
            CountKind::Providers => self.providers,
            CountKind::Clients => self.clients,
            CountKind::Sales => self.sales,
        }
    }
}

/// Result of one fan-out: what arrived plus the last error of each failed slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountsOutcome {
    pub counts: Counts,
    pub failures: Vec<(CountKind, AppError)>,
}

async fn fetch_one(source: &dyn CountSource, kind: CountKind) -> Result<usize, AppError> {
    let mut last_error = AppError::Network("sin intentos".to_string());
    for attempt in 1..=RETRY_ATTEMPTS {
        match source.count(kind).await {
            Ok(n) => return Ok(n),
            Err(e) => {
                log::warn!("count {:?} attempt {} failed: {}", kind, attempt, e);
                // A rejected token will not get better on retry
                if e.is_authentication() {
                    return Err(e);
                }
                last_error = e;
            }
        }
    }
    Err(last_error)
}

pub async fn fetch_counts(source: &dyn CountSource) -> CountsOutcome {
    let (products, providers, clients, sales) = futures::join!(
        fetch_one(source, CountKind::Products),
        fetch_one(source, CountKind::Providers),
        fetch_one(source, CountKind::Clients),
        fetch_one(source, CountKind::Sales),
    );

    let mut outcome = CountsOutcome::default();
    let mut keep = |kind: CountKind, result: Result<usize, AppError>| match result {
        Ok(n) => Some(n),
        Err(e) => {
            outcome.failures.push((kind, e));
            None
        }
    };
    let counts = Counts {
        products: keep(CountKind::Products, products),
        providers: keep(CountKind::Providers, providers),
        clients: keep(CountKind::Clients, clients),
        sales: keep(CountKind::Sales, sales),
    };
    outcome.counts = counts;
    outcome
}

/// Counts shared by the overview dashboard and the sidebar badges
#[derive(Clone, Copy)]
pub struct CountsContext {
    pub counts: RwSignal<Counts>,
    pub loading: RwSignal<bool>,
}

impl CountsContext {
    pub fn new() -> Self {
        Self {
            counts: RwSignal::new(Counts::default()),
            loading: RwSignal::new(false),
        }
    }

    pub fn refresh(&self, auth: AuthContext) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let source = RemoteCountSource {
                client: auth.client(),
            };
            let outcome = fetch_counts(&source).await;
            for (_, error) in &outcome.failures {
                auth.report(error);
            }
            // Session ended while the requests were in flight
            if !auth.session.with_untracked(|s| s.is_authenticated()) {
                this.loading.set(false);
                return;
            }
            this.counts.set(outcome.counts);
            this.loading.set(false);
        });
    }

    pub fn clear(&self) {
        self.counts.set(Counts::default());
    }
}

impl Default for CountsContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_counts() -> CountsContext {
    use_context::<CountsContext>().expect("CountsContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted answers per kind, consumed in order; missing entries succeed with 0
    #[derive(Default)]
    struct ScriptedSource {
        script: RefCell<HashMap<CountKind, Vec<Result<usize, AppError>>>>,
        calls: RefCell<HashMap<CountKind, usize>>,
    }

    impl ScriptedSource {
        fn with(mut self, kind: CountKind, answers: Vec<Result<usize, AppError>>) -> Self {
            self.script.get_mut().insert(kind, answers);
            self
        }

        fn calls(&self, kind: CountKind) -> usize {
            self.calls.borrow().get(&kind).copied().unwrap_or(0)
        }
    }

    #[async_trait(?Send)]
    impl CountSource for ScriptedSource {
        async fn count(&self, kind: CountKind) -> Result<usize, AppError> {
            *self.calls.borrow_mut().entry(kind).or_insert(0) += 1;
            let mut script = self.script.borrow_mut();
            match script.get_mut(&kind) {
                Some(answers) if !answers.is_empty() => answers.remove(0),
                _ => Ok(0),
            }
        }
    }

    fn server_error() -> AppError {
        AppError::Remote {
            status: 500,
            detail: String::new(),
        }
    }

    #[test]
    fn test_one_failing_endpoint_keeps_the_others() {
        let source = ScriptedSource::default()
            .with(CountKind::Products, vec![Ok(12)])
            .with(CountKind::Providers, vec![Err(server_error()), Err(server_error())])
            .with(CountKind::Clients, vec![Ok(30)])
            .with(CountKind::Sales, vec![Ok(7)]);

        let outcome = block_on(fetch_counts(&source));
        assert_eq!(
            outcome.counts,
            Counts {
                products: Some(12),
                providers: None,
                clients: Some(30),
                sales: Some(7),
            }
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, CountKind::Providers);
        assert_eq!(source.calls(CountKind::Providers), RETRY_ATTEMPTS);
    }

    #[test]
    fn test_retry_recovers_transient_failure() {
        let source = ScriptedSource::default()
            .with(CountKind::Sales, vec![Err(AppError::Network("reset".into())), Ok(41)]);

        let outcome = block_on(fetch_counts(&source));
        assert_eq!(outcome.counts.sales, Some(41));
        assert!(outcome.failures.is_empty());
        assert_eq!(source.calls(CountKind::Sales), 2);
        assert_eq!(source.calls(CountKind::Products), 1);
    }

    #[test]
    fn test_authentication_failure_is_not_retried() {
        let source = ScriptedSource::default().with(
            CountKind::Clients,
            vec![Err(AppError::Authentication("expired".into())), Ok(3)],
        );

        let outcome = block_on(fetch_counts(&source));
        assert_eq!(outcome.counts.clients, None);
        assert_eq!(source.calls(CountKind::Clients), 1);
        assert!(outcome.failures[0].1.is_authentication());
    }
}
