//! Augmentors derive or fill columns from other columns.
//!
//! The `add_*` variants overwrite their target for every row. The `fill_*`
//! variants only write rows where the target is missing and the source is
//! present, so hand-curated values survive.

use chrono::{Datelike, NaiveDate};
use mdlist_model::{Column, ColumnType, Table, Value};
use tracing::debug;

use crate::cells::date_cells;
use crate::datetime::month_name;
use crate::error::Result;

/// Overwrite `target` with the month name of the date in `source`.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `source` holds a non-date.
pub fn add_month(table: &mut Table, source: &str, target: &str) -> Result<()> {
    let Some(dates) = date_cells(table, source)? else {
        debug!(source = %source, "month derivation skipped, source absent");
        return Ok(());
    };
    let months: Vec<Option<String>> = dates.into_iter().map(|d| d.map(month_name)).collect();
    table.insert_column(target, Column::Text(months))?;
    Ok(())
}

/// Overwrite `target` with the calendar year of the date in `source`.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `source` holds a non-date.
pub fn add_year(table: &mut Table, source: &str, target: &str) -> Result<()> {
    let Some(dates) = date_cells(table, source)? else {
        debug!(source = %source, "year derivation skipped, source absent");
        return Ok(());
    };
    let years: Vec<Option<i64>> = dates
        .into_iter()
        .map(|d| d.map(|date| i64::from(date.year())))
        .collect();
    table.insert_column(target, Column::Integer(years))?;
    Ok(())
}

/// Fill missing `target` cells with the month name of `source`.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `source` holds a non-date.
pub fn fill_month(table: &mut Table, source: &str, target: &str) -> Result<()> {
    fill_from_dates(table, source, target, ColumnType::Text, |date| {
        Value::Text(month_name(date))
    })
}

/// Fill missing `target` cells with the calendar year of `source`.
///
/// # Errors
///
/// Returns [`crate::TransformError::TypeMismatch`] when `source` holds a non-date.
pub fn fill_year(table: &mut Table, source: &str, target: &str) -> Result<()> {
    fill_from_dates(table, source, target, ColumnType::Integer, |date| {
        Value::Int(i64::from(date.year()))
    })
}

fn fill_from_dates<F>(
    table: &mut Table,
    source: &str,
    target: &str,
    target_type: ColumnType,
    derive: F,
) -> Result<()>
where
    F: Fn(NaiveDate) -> Value,
{
    let Some(dates) = date_cells(table, source)? else {
        debug!(source = %source, target = %target, "fill skipped, source absent");
        return Ok(());
    };
    let column = table.ensure_column(target, target_type);
    let mut filled = 0usize;
    for (row, date) in dates.into_iter().enumerate() {
        let Some(date) = date else {
            continue;
        };
        if column.is_missing(row) {
            column.set(row, derive(date));
            filled += 1;
        }
    }
    debug!(source = %source, target = %target, filled, "filled missing values");
    Ok(())
}

/// Replace missing cells of `column` with `value`.
///
/// An absent column is created and filled for every row.
pub fn fill_constant(table: &mut Table, column: &str, value: &Value) {
    let target = table.ensure_column(column, ColumnType::Dynamic);
    let mut filled = 0usize;
    for row in 0..target.len() {
        if target.is_missing(row) {
            target.set(row, value.clone());
            filled += 1;
        }
    }
    debug!(column = %column, filled, "filled missing values with constant");
}

/// Add each named column as all-missing when it is absent.
pub fn add_columns(table: &mut Table, columns: &[String]) {
    for name in columns {
        if !table.has_column(name) {
            debug!(column = %name, "adding empty column");
            table.ensure_column(name, ColumnType::Dynamic);
        }
    }
}
