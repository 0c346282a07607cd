mod view;
mod view_model;

pub use view::ProviderDetails;
pub use view_model::ProviderDetailsViewModel;
