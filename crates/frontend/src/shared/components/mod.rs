pub mod composer_panels;
pub mod form_field;
pub mod history_table;
pub mod pagination_controls;
pub mod stat_card;
pub mod table;
