use chrono::NaiveDate;
use mdlist_model::{Column, Table, Value};

use crate::error::{Result, TransformError};

/// Date cells of `name`, or `None` when the column is absent.
///
/// Every present cell must already be a date; run a date converter first.
pub(crate) fn date_cells(table: &Table, name: &str) -> Result<Option<Vec<Option<NaiveDate>>>> {
    let Some(column) = table.column(name) else {
        return Ok(None);
    };
    if let Column::Date(values) = column {
        return Ok(Some(values.clone()));
    }
    column
        .iter()
        .enumerate()
        .map(|(row, value)| match value {
            Value::Date(date) => Ok(Some(date)),
            value if value.is_missing() => Ok(None),
            other => Err(TransformError::TypeMismatch {
                column: name.to_string(),
                row,
                expected: "date",
                found: other.type_name(),
            }),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Date cells of `name`, reading an absent column as all missing.
pub(crate) fn date_cells_or_missing(table: &Table, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    Ok(date_cells(table, name)?.unwrap_or_else(|| vec![None; table.height()]))
}
