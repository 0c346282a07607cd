//! Transaction Composer: cart, counterparty and commit flow shared by the
//! sale and purchase screens.

pub mod cart;
pub mod state;
pub mod summary;

pub use cart::{Cart, CartLine, CatalogItem};
pub use state::{
    commit, refresh_next_number, CommitRequest, ComposerCell, ComposerState, CommittedOrder,
    Counterparty, OrderGateway,
};
pub use summary::{CounterpartySnapshot, OrderSummary, TransactionKind};
