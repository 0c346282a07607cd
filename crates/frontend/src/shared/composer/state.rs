use async_trait::async_trait;
use chrono::Local;
use contracts::domain::common::OrderLineDraft;
use std::cell::RefCell;

use super::cart::{Cart, CartLine};
use super::summary::{parse_api_date, CounterpartySnapshot, OrderSummary, TransactionKind};
use crate::shared::error::AppError;

/// Server answer to a successful create
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedOrder {
    pub id: i64,
    pub number: String,
    pub date: Option<String>,
}

/// Remote side of one composer (`ventas` or `compras`)
#[async_trait(?Send)]
pub trait OrderGateway {
    fn kind(&self) -> TransactionKind;

    /// Advisory preview of the next sequence number
    async fn next_number(&self) -> Result<String, AppError>;

    async fn create_order(
        &self,
        counterparty_id: i64,
        lines: Vec<OrderLineDraft>,
    ) -> Result<CommittedOrder, AppError>;
}

/// Client or provider selectable in a composer
pub trait Counterparty: Clone {
    fn id(&self) -> i64;
    fn snapshot(&self) -> CounterpartySnapshot;
}

/// Everything sent with one commit, frozen before the request leaves
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRequest {
    pub counterparty_id: i64,
    pub counterparty: CounterpartySnapshot,
    pub lines: Vec<CartLine>,
}

impl CommitRequest {
    pub fn drafts(&self) -> Vec<OrderLineDraft> {
        self.lines
            .iter()
            .map(|l| OrderLineDraft {
                product_id: l.item_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState<C> {
    kind: TransactionKind,
    counterparty: Option<C>,
    cart: Cart,
    next_number: Option<String>,
    seller: Option<String>,
    committed: Option<OrderSummary>,
    committing: bool,
}

impl<C: Counterparty> ComposerState<C> {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            counterparty: None,
            cart: Cart::new(),
            next_number: None,
            seller: None,
            committed: None,
            committing: false,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn counterparty(&self) -> Option<&C> {
        self.counterparty.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn next_number(&self) -> Option<&str> {
        self.next_number.as_deref()
    }

    pub fn set_next_number(&mut self, number: Option<String>) {
        self.next_number = number;
    }

    /// Shown as the seller on sale documents
    pub fn set_seller(&mut self, seller: Option<String>) {
        self.seller = seller;
    }

    pub fn committed(&self) -> Option<&OrderSummary> {
        self.committed.as_ref()
    }

    pub fn is_committing(&self) -> bool {
        self.committing
    }

    /// No edits while a commit is in flight or after it succeeded
    pub fn is_locked(&self) -> bool {
        self.committing || self.committed.is_some()
    }

    pub fn select_counterparty(&mut self, counterparty: Option<C>) -> Result<(), AppError> {
        if self.is_locked() {
            return Err(locked_error());
        }
        self.counterparty = counterparty;
        Ok(())
    }

    /// Run `f` on the cart unless the composer is locked
    pub fn edit_cart<R>(&mut self, f: impl FnOnce(&mut Cart) -> R) -> Result<R, AppError> {
        if self.is_locked() {
            return Err(locked_error());
        }
        Ok(f(&mut self.cart))
    }

    /// Explicit "new transaction": forget the committed order and the selection
    pub fn start_new(&mut self) {
        self.counterparty = None;
        self.cart.clear();
        self.committed = None;
        self.committing = false;
    }

    /// Checks run before anything is sent (and before asking for confirmation)
    pub fn validate(&self) -> Result<(), AppError> {
        if self.committed.is_some() {
            return Err(AppError::validation(
                "La orden ya fue registrada. Inicie una nueva transacción.",
            ));
        }
        if self.committing {
            return Err(AppError::validation("La orden se está registrando"));
        }
        if self.counterparty.is_none() {
            return Err(AppError::validation(format!(
                "Seleccione un {}",
                self.kind.counterparty_label().to_lowercase()
            )));
        }
        if self.cart.is_empty() {
            return Err(AppError::validation("Agregue al menos un producto"));
        }
        Ok(())
    }

    /// Validate and freeze the request. Nothing is sent when this fails.
    pub fn begin_commit(&mut self) -> Result<CommitRequest, AppError> {
        self.validate()?;
        let request = match self.counterparty.as_ref() {
            Some(counterparty) => CommitRequest {
                counterparty_id: counterparty.id(),
                counterparty: counterparty.snapshot(),
                lines: self.cart.lines().to_vec(),
            },
            None => return Err(AppError::validation("Seleccione una contraparte")),
        };
        self.committing = true;
        Ok(request)
    }

    /// Apply the create result. The summary uses the committed number, never the preview.
    pub fn finish_commit(
        &mut self,
        request: CommitRequest,
        result: Result<CommittedOrder, AppError>,
    ) -> Result<OrderSummary, AppError> {
        self.committing = false;
        let committed = result?;
        let date = committed
            .date
            .as_deref()
            .and_then(parse_api_date)
            .unwrap_or_else(|| Local::now().date_naive());
        let summary = OrderSummary::new(
            self.kind,
            committed.number,
            date,
            request.counterparty,
            match self.kind {
                TransactionKind::Sale => self.seller.clone(),
                TransactionKind::Purchase => None,
            },
            request.lines,
        );
        log::info!(
            "{} {} registered (id {})",
            self.kind.title(),
            summary.order_number,
            committed.id
        );
        self.committed = Some(summary.clone());
        Ok(summary)
    }
}

fn locked_error() -> AppError {
    AppError::validation("La orden ya fue registrada. Inicie una nueva transacción.")
}

/// Holder of a composer that is only borrowed between awaits, so the
/// screen keeps rendering while a request is in flight
pub trait ComposerCell<C> {
    /// `None` once the holder is gone (screen closed mid-request)
    fn with_state<R>(&self, f: impl FnOnce(&mut ComposerState<C>) -> R) -> Option<R>;
}

impl<C> ComposerCell<C> for RefCell<ComposerState<C>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut ComposerState<C>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

fn detached_error() -> AppError {
    AppError::validation("La pantalla se cerró antes de terminar")
}

/// Re-read the advisory next number; failures keep the previous value
pub async fn refresh_next_number<C, S>(
    state: &S,
    gateway: &dyn OrderGateway,
) -> Result<(), AppError>
where
    C: Counterparty,
    S: ComposerCell<C>,
{
    let number = gateway.next_number().await?;
    state.with_state(|s| s.set_next_number(Some(number)));
    Ok(())
}

/// Validate, create the order, then refresh the preview number
pub async fn commit<C, S>(state: &S, gateway: &dyn OrderGateway) -> Result<OrderSummary, AppError>
where
    C: Counterparty,
    S: ComposerCell<C>,
{
    let request = state
        .with_state(|s| s.begin_commit())
        .ok_or_else(detached_error)??;
    let result = gateway
        .create_order(request.counterparty_id, request.drafts())
        .await;
    let summary = state
        .with_state(|s| s.finish_commit(request, result))
        .ok_or_else(detached_error)??;
    if let Err(e) = refresh_next_number(state, gateway).await {
        log::warn!("{}: next number not refreshed: {}", gateway.kind().title(), e);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::composer::CatalogItem;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    struct Buyer(i64);

    impl Counterparty for Buyer {
        fn id(&self) -> i64 {
            self.0
        }

        fn snapshot(&self) -> CounterpartySnapshot {
            CounterpartySnapshot {
                name: format!("Cliente {}", self.0),
                tax_id: Some("20123456789".into()),
            }
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        creates: Cell<usize>,
        previews: Cell<usize>,
        sent: RefCell<Vec<(i64, Vec<OrderLineDraft>)>>,
        fail_create: bool,
        fail_preview: bool,
    }

    #[async_trait(?Send)]
    impl OrderGateway for FakeGateway {
        fn kind(&self) -> TransactionKind {
            TransactionKind::Sale
        }

        async fn next_number(&self) -> Result<String, AppError> {
            self.previews.set(self.previews.get() + 1);
            if self.fail_preview {
                return Err(AppError::Network("offline".into()));
            }
            Ok(format!("{:07}", 42 + self.previews.get()))
        }

        async fn create_order(
            &self,
            counterparty_id: i64,
            lines: Vec<OrderLineDraft>,
        ) -> Result<CommittedOrder, AppError> {
            self.creates.set(self.creates.get() + 1);
            if self.fail_create {
                return Err(AppError::Remote {
                    status: 400,
                    detail: "Stock insuficiente".into(),
                });
            }
            self.sent.borrow_mut().push((counterparty_id, lines));
            Ok(CommittedOrder {
                id: 501,
                number: "0000777".into(),
                date: Some("2024-05-02T10:00:00".into()),
            })
        }
    }

    fn filled_state() -> ComposerState<Buyer> {
        let mut state = ComposerState::new(TransactionKind::Sale);
        state
            .edit_cart(|cart| {
                cart.add_line(&CatalogItem {
                    id: 1,
                    name: "Martillo".into(),
                    unit_price: 10.0,
                    stock: Some(3),
                });
                cart.add_line(&CatalogItem {
                    id: 1,
                    name: "Martillo".into(),
                    unit_price: 10.0,
                    stock: Some(3),
                });
            })
            .unwrap();
        state
    }

    /// Hands out the composer `live` times, then behaves like a closed screen
    struct ClosingCell {
        state: RefCell<ComposerState<Buyer>>,
        live: Cell<usize>,
    }

    impl ComposerCell<Buyer> for ClosingCell {
        fn with_state<R>(&self, f: impl FnOnce(&mut ComposerState<Buyer>) -> R) -> Option<R> {
            if self.live.get() == 0 {
                return None;
            }
            self.live.set(self.live.get() - 1);
            Some(f(&mut self.state.borrow_mut()))
        }
    }

    #[test]
    fn test_commit_without_counterparty_makes_no_calls() {
        let state = RefCell::new(filled_state());
        let gateway = FakeGateway::default();

        let err = block_on(commit(&state, &gateway)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(gateway.creates.get(), 0);
        assert_eq!(gateway.previews.get(), 0);
        assert!(!state.borrow().is_committing());
    }

    #[test]
    fn test_commit_with_empty_cart_makes_no_calls() {
        let mut composer: ComposerState<Buyer> = ComposerState::new(TransactionKind::Sale);
        composer.select_counterparty(Some(Buyer(3))).unwrap();
        let state = RefCell::new(composer);
        let gateway = FakeGateway::default();

        assert!(block_on(commit(&state, &gateway)).is_err());
        assert_eq!(gateway.creates.get(), 0);
    }

    #[test]
    fn test_summary_uses_committed_number_not_preview() {
        let mut composer = filled_state();
        composer.set_next_number(Some("0000100".into()));
        composer.set_seller(Some("Ana Quispe".into()));
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let state = RefCell::new(composer);
        let gateway = FakeGateway::default();

        let summary = block_on(commit(&state, &gateway)).unwrap();
        assert_eq!(summary.order_number, "0000777");
        assert_eq!(summary.seller.as_deref(), Some("Ana Quispe"));
        assert_eq!(summary.date, chrono::NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert!((summary.grand_total - 20.0).abs() < 1e-9);
        assert_eq!(state.borrow().next_number(), Some("0000043"));
        assert_eq!(state.borrow().committed(), Some(&summary));

        let sent = gateway.sent.borrow();
        assert_eq!(sent[0].0, 9);
        assert_eq!(sent[0].1[0].quantity, 2);
        assert_eq!(sent[0].1[0].product_id, 1);
        assert_eq!(sent[0].1[0].unit_price, 10.0);
    }

    #[test]
    fn test_committed_state_is_locked_until_start_new() {
        let mut composer = filled_state();
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let state = RefCell::new(composer);
        let gateway = FakeGateway::default();
        block_on(commit(&state, &gateway)).unwrap();

        {
            let mut s = state.borrow_mut();
            // Cart kept for the export, edits refused
            assert_eq!(s.cart().len(), 1);
            assert!(s.edit_cart(|c| c.clear()).is_err());
            assert!(s.select_counterparty(None).is_err());
        }
        assert!(block_on(commit(&state, &gateway)).is_err());
        assert_eq!(gateway.creates.get(), 1);

        let mut s = state.borrow_mut();
        s.start_new();
        assert!(s.committed().is_none());
        assert!(s.cart().is_empty());
        assert!(s.counterparty().is_none());
    }

    #[test]
    fn test_summary_survives_cart_reset() {
        let mut composer = filled_state();
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let state = RefCell::new(composer);
        let summary = block_on(commit(&state, &FakeGateway::default())).unwrap();
        state.borrow_mut().start_new();
        assert_eq!(summary.lines.len(), 1);
        assert!((summary.grand_total - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_create_unlocks_and_keeps_cart() {
        let mut composer = filled_state();
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let state = RefCell::new(composer);
        let gateway = FakeGateway {
            fail_create: true,
            ..Default::default()
        };

        let err = block_on(commit(&state, &gateway)).unwrap_err();
        assert_eq!(err.user_message(), "Stock insuficiente");
        let s = state.borrow();
        assert!(!s.is_locked());
        assert!(s.committed().is_none());
        assert_eq!(s.cart().quantity_of(1), 2);
        assert_eq!(gateway.previews.get(), 0);
    }

    #[test]
    fn test_preview_failure_does_not_fail_commit() {
        let mut composer = filled_state();
        composer.set_next_number(Some("0000100".into()));
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let state = RefCell::new(composer);
        let gateway = FakeGateway {
            fail_preview: true,
            ..Default::default()
        };

        let summary = block_on(commit(&state, &gateway)).unwrap();
        assert_eq!(summary.order_number, "0000777");
        assert_eq!(state.borrow().next_number(), Some("0000100"));
    }

    #[test]
    fn test_refresh_next_number_keeps_previous_on_failure() {
        let mut composer = filled_state();
        composer.set_next_number(Some("0000100".into()));
        let state = RefCell::new(composer);

        let failing = FakeGateway {
            fail_preview: true,
            ..Default::default()
        };
        assert!(block_on(refresh_next_number(&state, &failing)).is_err());
        assert_eq!(state.borrow().next_number(), Some("0000100"));

        block_on(refresh_next_number(&state, &FakeGateway::default())).unwrap();
        assert_eq!(state.borrow().next_number(), Some("0000043"));
    }

    #[test]
    fn test_closed_screen_stops_before_sending() {
        let mut composer = filled_state();
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        let cell = ClosingCell {
            state: RefCell::new(composer),
            live: Cell::new(0),
        };
        let gateway = FakeGateway::default();

        let err = block_on(commit(&cell, &gateway)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(gateway.creates.get(), 0);
    }

    #[test]
    fn test_closed_screen_after_create_skips_preview() {
        let mut composer = filled_state();
        composer.select_counterparty(Some(Buyer(9))).unwrap();
        // Only `begin_commit` sees the composer
        let cell = ClosingCell {
            state: RefCell::new(composer),
            live: Cell::new(1),
        };
        let gateway = FakeGateway::default();

        assert!(block_on(commit(&cell, &gateway)).is_err());
        assert_eq!(gateway.creates.get(), 1);
        assert_eq!(gateway.previews.get(), 0);
    }

    #[test]
    fn test_validate_has_no_side_effects() {
        let mut state = filled_state();
        assert!(state.validate().is_err());
        state.select_counterparty(Some(Buyer(2))).unwrap();
        assert!(state.validate().is_ok());
        assert!(!state.is_committing());
        assert!(!state.is_locked());
    }
}
