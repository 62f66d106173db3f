pub mod pagination;
pub mod table;
