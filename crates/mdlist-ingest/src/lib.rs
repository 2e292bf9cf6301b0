//! Record loading for mdlist.
//!
//! - **discovery**: expand files and directories, build a [`mdlist_model::Table`]
//! - **structured**: YAML, JSON and Markdown front matter
//! - **csv**: CSV through Polars
//! - **format**: extension-based format detection

pub mod csv;
pub mod discovery;
pub mod error;
pub mod format;
pub mod structured;

pub use discovery::{expand_inputs, list_input_files, load_records, load_table};
pub use error::{IngestError, Result};
pub use format::InputFormat;
pub use structured::{CONTENT_FIELD, json_to_value, yaml_to_value};
