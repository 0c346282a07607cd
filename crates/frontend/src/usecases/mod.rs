pub mod u501_new_sale;
pub mod u502_new_purchase;
