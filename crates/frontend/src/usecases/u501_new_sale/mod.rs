pub mod gateway;
pub mod view;

pub use view::NewSaleView;
