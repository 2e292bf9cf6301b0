//! Input expansion and table loading.

use std::path::{Path, PathBuf};
use std::time::Instant;

use mdlist_model::{Record, Table};
use tracing::{debug, info, warn};

use crate::csv::read_csv;
use crate::error::{IngestError, Result};
use crate::format::InputFormat;
use crate::structured::{read_json, read_markdown, read_yaml};

/// Lists the supported files in a directory, sorted by file name.
///
/// Subdirectories and files with other extensions are skipped.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if InputFormat::from_path(&path).is_some() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping unsupported file");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expand files and directories into the ordered list of files to read.
pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(list_input_files(path)?);
        } else if path.is_file() {
            if InputFormat::from_path(path).is_none() {
                return Err(IngestError::UnsupportedFormat { path: path.clone() });
            }
            files.push(path.clone());
        } else {
            return Err(IngestError::NotFound { path: path.clone() });
        }
    }
    Ok(files)
}

/// Read the records of one file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let format = InputFormat::from_path(path)
        .ok_or_else(|| IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    let records = match format {
        InputFormat::Yaml => read_yaml(path)?,
        InputFormat::Json => read_json(path)?,
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Markdown => read_markdown(path)?,
    };
    debug!(
        path = %path.display(),
        format = format.as_str(),
        records = records.len(),
        "loaded file"
    );
    Ok(records)
}

/// Load every input into one table, concatenating records in input order.
///
/// Fields absent from a record are missing in its row.
pub fn load_table(paths: &[PathBuf]) -> Result<Table> {
    let start = Instant::now();
    let files = expand_inputs(paths)?;
    if files.is_empty() {
        warn!("no input files found");
    }
    let mut records = Vec::new();
    for file in &files {
        records.extend(load_records(file)?);
    }
    let table = Table::from_records(records);
    info!(
        files = files.len(),
        rows = table.height(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}
