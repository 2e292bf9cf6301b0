//! CSV loading through Polars.
//!
//! The header row names the fields. Polars infers column types, and empty
//! cells arrive as nulls, which become missing values.

use std::path::Path;

use mdlist_model::{Record, Value};
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, PolarsError, SerReader};

use crate::error::{IngestError, Result};

pub fn read_csv(path: &Path) -> Result<Vec<Record>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|err| csv_error(path, &err))?
        .finish()
        .map_err(|err| csv_error(path, &err))?;
    frame_to_records(path, &df)
}

fn csv_error(path: &Path, err: &PolarsError) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn frame_to_records(path: &Path, df: &DataFrame) -> Result<Vec<Record>> {
    let columns = df.get_columns();
    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut record = Record::new();
        for column in columns {
            let cell = column.get(row).map_err(|err| csv_error(path, &err))?;
            record.insert(column.name().to_string(), any_to_value(cell));
        }
        records.push(record);
    }
    Ok(records)
}

/// Converts a Polars cell into a record value.
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Missing,
        AnyValue::Boolean(flag) => Value::Bool(flag),
        AnyValue::Int32(v) => Value::Int(i64::from(v)),
        AnyValue::Int64(v) => Value::Int(v),
        AnyValue::UInt32(v) => Value::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
        AnyValue::Float32(v) => Value::Float(f64::from(v)),
        AnyValue::Float64(v) => Value::Float(v),
        AnyValue::String(text) => Value::Text(text.to_string()),
        AnyValue::StringOwned(text) => Value::Text(text.to_string()),
        other => Value::Text(other.to_string()),
    }
}
