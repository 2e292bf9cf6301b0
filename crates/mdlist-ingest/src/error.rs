//! Error types for record loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading records.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Explicitly named file with an extension no loader handles.
    #[error("unsupported input format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parse Errors ===
    #[error("failed to parse YAML {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Markdown file without a closed `---` front matter block.
    #[error("no front matter in {path}")]
    MissingFrontMatter { path: PathBuf },

    /// Document is not a mapping or a list of mappings.
    #[error("unexpected document shape in {path}: {message}")]
    Shape { path: PathBuf, message: String },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
