pub mod details;
pub mod list;

pub use details::ProviderDetails;
pub use list::ProviderList;
