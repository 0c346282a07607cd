pub mod a001_unit_type;
pub mod a002_product;
pub mod a003_client;
pub mod a004_provider;
pub mod a005_sale;
pub mod a006_purchase;
