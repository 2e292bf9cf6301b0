//! Error types for pipeline execution.

use mdlist_transform::TransformError;
use thiserror::Error;

use crate::render::RenderError;

/// Errors that abort a pipeline run. No partial output is produced.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A converter, augmentor, predicate or the sorter failed.
    #[error("{category}: step {step} failed")]
    Step {
        category: String,
        step: &'static str,
        #[source]
        source: TransformError,
    },

    #[error("{category}: rendering row {row} failed")]
    Render {
        category: String,
        row: usize,
        #[source]
        source: RenderError,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
