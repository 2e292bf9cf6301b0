#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::column::{Column, ColumnType};
use crate::error::{ModelError, Result};
use crate::value::Value;

/// One row of a table: field name to cell value.
pub type Record = BTreeMap<String, Value>;

/// An ordered sequence of records stored column-wise.
///
/// Columns are keyed by field name; every column has exactly
/// [`Table::height`] cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    height: usize,
    columns: BTreeMap<String, Column>,
}

impl Table {
    /// An empty table with `height` rows and no columns.
    pub fn new(height: usize) -> Self {
        Self {
            height,
            columns: BTreeMap::new(),
        }
    }

    /// Build a table from heterogeneous records.
    ///
    /// The column set is the union of all field names; a field absent from a
    /// record reads as [`Value::Missing`] in that row.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().collect();
        let height = records.len();
        let mut columns: BTreeMap<String, Column> = BTreeMap::new();
        for (row, record) in records.into_iter().enumerate() {
            for (name, value) in record {
                columns
                    .entry(name)
                    .or_insert_with(|| Column::missing(ColumnType::Dynamic, height))
                    .set(row, value);
            }
        }
        Self { height, columns }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Insert or replace a column, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LengthMismatch`] if the column length differs
    /// from the table height.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<Option<Column>> {
        let name = name.into();
        if column.len() != self.height {
            return Err(ModelError::LengthMismatch {
                column: name,
                expected: self.height,
                actual: column.len(),
            });
        }
        Ok(self.columns.insert(name, column))
    }

    /// Column `name`, created as all-missing of `column_type` when absent.
    pub fn ensure_column(&mut self, name: &str, column_type: ColumnType) -> &mut Column {
        let height = self.height;
        self.columns
            .entry(name.to_string())
            .or_insert_with(|| Column::missing(column_type, height))
    }

    /// Cell value; absent columns and rows read as missing.
    pub fn get(&self, row: usize, column: &str) -> Value {
        self.columns
            .get(column)
            .map(|col| col.get(row))
            .unwrap_or_default()
    }

    /// Materialise row `idx` as a record with every column present.
    pub fn row(&self, idx: usize) -> Record {
        self.columns
            .iter()
            .map(|(name, column)| (name.clone(), column.get(idx)))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.height).map(|idx| self.row(idx))
    }

    /// New table holding the rows at `indices`, in that order.
    pub fn take(&self, indices: &[usize]) -> Self {
        Self {
            height: indices.len(),
            columns: self
                .columns
                .iter()
                .map(|(name, column)| (name.clone(), column.take(indices)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, Value)]) -> Record {
        fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn from_records_unions_fields() {
        let table = Table::from_records(vec![
            record(&[("title", "A".into())]),
            record(&[("title", "B".into()), ("venue", "Sheffield".into())]),
        ]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.get(0, "venue"), Value::Missing);
        assert_eq!(table.get(1, "venue"), Value::from("Sheffield"));
        assert_eq!(table.get(1, "absent"), Value::Missing);
    }

    #[test]
    fn insert_column_checks_length() {
        let mut table = Table::new(2);
        let err = table
            .insert_column("year", Column::Integer(vec![Some(2020)]))
            .unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn take_keeps_all_columns() {
        let table = Table::from_records(vec![
            record(&[("n", Value::Int(1))]),
            record(&[("n", Value::Int(2))]),
        ]);
        let reversed = table.take(&[1, 0]);
        assert_eq!(reversed.get(0, "n"), Value::Int(2));
        assert_eq!(reversed.get(1, "n"), Value::Int(1));
    }
}
