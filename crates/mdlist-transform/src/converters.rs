//! Column converters.
//!
//! Each converter types one or more columns in place. Columns that are not
//! present in the table are skipped: records of one category rarely carry
//! every field.

use chrono::NaiveDate;
use mdlist_model::{Column, Table, Value};
use tracing::{debug, warn};

use crate::datetime::{value_to_date, ymd};
use crate::error::{Result, TransformError};

/// Parse each named column into a date column.
///
/// Unparseable and missing cells become missing.
pub fn to_date(table: &mut Table, columns: &[String]) {
    for name in columns {
        let Some(column) = table.column_mut(name) else {
            debug!(column = %name, "date conversion skipped, column absent");
            continue;
        };
        let dates: Vec<Option<NaiveDate>> = column.iter().map(|value| value_to_date(&value)).collect();
        let unparsed = count_lost(column, &dates);
        if unparsed > 0 {
            warn!(column = %name, unparsed, "unparseable dates set to missing");
        }
        *column = Column::Date(dates);
    }
}

/// Parse each named column into a nullable integer column.
///
/// Numbers are truncated toward zero; non-numeric cells become missing.
pub fn to_integer(table: &mut Table, columns: &[String]) {
    for name in columns {
        let Some(column) = table.column_mut(name) else {
            debug!(column = %name, "integer conversion skipped, column absent");
            continue;
        };
        let ints: Vec<Option<i64>> = column.iter().map(|value| value_to_int(&value)).collect();
        let unparsed = count_lost(column, &ints);
        if unparsed > 0 {
            warn!(column = %name, unparsed, "non-numeric values set to missing");
        }
        *column = Column::Integer(ints);
    }
}

/// Stringify each non-missing cell of the named columns.
pub fn to_text(table: &mut Table, columns: &[String]) {
    for name in columns {
        let Some(column) = table.column_mut(name) else {
            debug!(column = %name, "text conversion skipped, column absent");
            continue;
        };
        let texts: Vec<Option<String>> = column
            .iter()
            .map(|value| match value {
                Value::Text(text) => Some(text),
                value if value.is_missing() => None,
                other => Some(other.to_string()),
            })
            .collect();
        *column = Column::Text(texts);
    }
}

/// Turn bare years into `"<year>-01-01"` strings ahead of date parsing.
///
/// Cells that are not bare years are left as they are.
pub fn year_to_new_year_day(table: &mut Table, columns: &[String]) {
    for name in columns {
        let Some(column) = table.column_mut(name) else {
            debug!(column = %name, "new-year conversion skipped, column absent");
            continue;
        };
        for row in 0..column.len() {
            let year = match column.get(row) {
                Value::Int(year) => year,
                Value::Text(text) => match text.trim().parse::<i64>() {
                    Ok(year) => year,
                    Err(_) => continue,
                },
                _ => continue,
            };
            column.set(row, Value::Text(format!("{year}-01-01")));
        }
    }
}

/// Convert a year-like column into dates using `month` and `day` for bare years.
///
/// Accepts integer years, year strings, `%Y-%m-%d` strings and dates.
///
/// # Errors
///
/// Returns [`TransformError::TypeMismatch`] for any other cell type and
/// [`TransformError::InvalidDate`] for strings that are neither a year nor a
/// valid `%Y-%m-%d` date.
pub fn year_to_iso(table: &mut Table, column: &str, month: u32, day: u32) -> Result<()> {
    let Some(cells) = table.column_mut(column) else {
        debug!(column = %column, "year conversion skipped, column absent");
        return Ok(());
    };
    let mut dates = Vec::with_capacity(cells.len());
    for (row, value) in cells.iter().enumerate() {
        let date = match value {
            value if value.is_missing() => None,
            Value::Int(year) => Some(ymd(column, row, year, month, day)?),
            Value::Text(text) => {
                let trimmed = text.trim();
                match trimmed.parse::<i64>() {
                    Ok(year) => Some(ymd(column, row, year, month, day)?),
                    Err(_) => Some(NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(
                        |_| TransformError::InvalidDate {
                            column: column.to_string(),
                            row,
                            value: trimmed.to_string(),
                        },
                    )?),
                }
            }
            Value::Date(date) => Some(date),
            other => {
                return Err(TransformError::TypeMismatch {
                    column: column.to_string(),
                    row,
                    expected: "int, text or date",
                    found: other.type_name(),
                });
            }
        };
        dates.push(date);
    }
    *cells = Column::Date(dates);
    Ok(())
}

fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(value) => Some(*value),
        Value::Bool(value) => Some(i64::from(*value)),
        Value::Float(value) => float_to_int(*value),
        Value::Text(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_int))
        }
        _ => None,
    }
}

fn float_to_int(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Cells that were present before conversion but missing after.
fn count_lost<T>(before: &Column, after: &[Option<T>]) -> usize {
    after
        .iter()
        .enumerate()
        .filter(|(row, converted)| converted.is_none() && !before.is_missing(*row))
        .count()
}
