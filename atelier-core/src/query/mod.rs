//! Filtering and pagination shared by every list view.

pub mod filtering;
pub mod listable;
pub mod pagination;

pub use filtering::{
    CategoryFilter, DEFAULT_PAGE_SIZE, FilterState, StatusFilter, filter_items,
    matches,
};
pub use listable::Listable;
pub use pagination::{PageResult, clamp_page, paginate};
