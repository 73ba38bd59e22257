pub mod ai;
pub mod page_source;
