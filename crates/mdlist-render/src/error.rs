//! Error types for template loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`crate::TemplateRenderer`].
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read template directory {path}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read template {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {name}")]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },
}

/// Result type for template loading.
pub type Result<T> = std::result::Result<T, TemplateError>;
