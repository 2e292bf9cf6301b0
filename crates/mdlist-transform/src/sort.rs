//! Multi-key stable sorting.

use std::cmp::Ordering;

use mdlist_model::{Column, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Sort direction, shared by every key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

/// Original row indices in sorted order.
///
/// Keys compare lexicographically; ties keep their input order. Missing
/// values go last whatever the direction.
///
/// # Errors
///
/// Returns [`TransformError::MissingColumn`] if a key column does not exist.
pub fn sort_indices(table: &Table, keys: &[String], order: SortOrder) -> Result<Vec<usize>> {
    let columns = keys
        .iter()
        .map(|key| {
            table
                .column(key)
                .ok_or_else(|| TransformError::MissingColumn(key.clone()))
        })
        .collect::<Result<Vec<&Column>>>()?;

    let mut indices: Vec<usize> = (0..table.height()).collect();
    indices.sort_by(|&a, &b| compare_rows(&columns, a, b, order));
    debug!(keys = ?keys, ?order, rows = indices.len(), "sorted rows");
    Ok(indices)
}

/// Materialise the rows of `table` in sorted order.
///
/// # Errors
///
/// Returns [`TransformError::MissingColumn`] if a key column does not exist.
pub fn sort_table(table: &Table, keys: &[String], order: SortOrder) -> Result<Table> {
    let indices = sort_indices(table, keys, order)?;
    Ok(table.take(&indices))
}

fn compare_rows(columns: &[&Column], a: usize, b: usize, order: SortOrder) -> Ordering {
    for column in columns {
        let left = column.get(a);
        let right = column.get(b);
        let ordering = match (left.is_missing(), right.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = left.total_cmp(&right);
                if order.is_descending() {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdlist_model::Value;

    fn table(values: Vec<Value>) -> Table {
        let mut table = Table::new(values.len());
        table
            .insert_column("key", Column::Dynamic(values))
            .expect("column fits");
        table
    }

    #[test]
    fn missing_sorts_last_both_ways() {
        let table = table(vec![Value::Int(2), Value::Missing, Value::Int(5), Value::Int(1)]);
        let keys = vec!["key".to_string()];
        assert_eq!(
            sort_indices(&table, &keys, SortOrder::Ascending).unwrap(),
            vec![3, 0, 2, 1]
        );
        assert_eq!(
            sort_indices(&table, &keys, SortOrder::Descending).unwrap(),
            vec![2, 0, 3, 1]
        );
    }

    #[test]
    fn absent_key_is_an_error() {
        let table = table(vec![Value::Int(1)]);
        let err = sort_indices(&table, &["year".to_string()], SortOrder::Ascending).unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn(name) if name == "year"));
    }
}
