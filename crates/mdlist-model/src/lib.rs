//! Data model for mdlist pipelines.
//!
//! - **value**: dynamically-typed cells with an explicit missing state
//! - **column**: typed nullable columns (dynamic, integer, date, text)
//! - **table**: column-wise tables built from heterogeneous records

pub mod column;
pub mod error;
pub mod table;
pub mod value;

pub use column::{Column, ColumnType};
pub use error::{ModelError, Result};
pub use table::{Record, Table};
pub use value::{DATE_FORMAT, Value};
