pub mod number_format;
pub mod sortable_header_cell;
pub mod table_cell_money;

pub use number_format::*;
pub use sortable_header_cell::SortableHeaderCell;
pub use table_cell_money::TableCellMoney;
