//! Types shared by the sale and purchase documents

pub mod transaction;

pub use transaction::{
    CounterpartyRef, DetailLine, NextOrderNumber, OrderLineDraft, PersonRef, ProductRef,
    TransactionRecord,
};
