//! Product details: view-model holds the form, view renders it.
//! Non-administrators get a read-only form.

mod view;
mod view_model;

pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
