pub mod details;
pub mod list;

pub use details::PurchaseDetail;
pub use list::PurchaseList;
