pub mod counts;
pub mod ui;
