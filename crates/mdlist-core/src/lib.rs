//! Declarative list pipelines.
//!
//! - **step**: converter, augmentor and predicate step types
//! - **registry**: category name to pipeline definition
//! - **executor**: runs a definition over a table and renders the result
//! - **clean**: strips missing values before rendering
//! - **render**: the template renderer seam

pub mod clean;
pub mod context;
pub mod error;
pub mod executor;
pub mod registry;
pub mod render;
pub mod step;

pub use clean::clean_record;
pub use context::{DEFAULT_LOOKBACK_YEARS, ExecutionContext};
pub use error::{PipelineError, Result};
pub use executor::{Executor, Prepared, PreparedRow, RunReport};
pub use registry::{DEFAULT_SUPERVISOR, PipelineDefinition, Registry};
pub use render::{RenderError, Renderer};
pub use step::{Augmentor, Converter, FilterSpec, Predicate, SortSpec, Step};
