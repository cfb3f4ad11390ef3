pub mod admin;
pub mod catalog;

pub use admin::AdminViewModel;
pub use catalog::{CatalogViewModel, FilterState, SortKey};
