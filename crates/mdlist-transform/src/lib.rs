//! Column transformations for mdlist tables.
//!
//! - **converters**: type columns in place (dates, integers, text, years)
//! - **augmentors**: derive or fill columns from other columns
//! - **filters**: tri-state row predicates and mask combination
//! - **sort**: stable multi-key sorting with missing values last
//! - **datetime**: lenient calendar date parsing

pub mod augmentors;
pub mod converters;
pub mod datetime;
pub mod error;
pub mod filters;
pub mod sort;

mod cells;

pub use datetime::{month_name, parse_date};
pub use error::{Result, TransformError};
pub use filters::{Mask, all_true, and_into, is_selected, selected_count};
pub use sort::{SortOrder, sort_indices, sort_table};
