pub mod api_utils;
pub mod components;
pub mod composer;
pub mod confirm;
pub mod date_utils;
pub mod document;
pub mod error;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;
pub mod record_browser;
