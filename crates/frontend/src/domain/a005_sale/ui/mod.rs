pub mod details;
pub mod list;

pub use details::SaleDetail;
pub use list::SaleList;
