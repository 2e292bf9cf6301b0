//! Tests for multi-key sorting.

use chrono::NaiveDate;
use mdlist_model::{Column, Table, Value};
use mdlist_transform::{SortOrder, sort_indices, sort_table};
use proptest::prelude::*;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn later_keys_break_ties() {
    let mut table = Table::new(4);
    table
        .insert_column(
            "year",
            Column::Integer(vec![Some(2020), Some(2021), Some(2020), Some(2021)]),
        )
        .unwrap();
    table
        .insert_column(
            "title",
            Column::Text(vec![
                Some("b".to_string()),
                Some("a".to_string()),
                Some("a".to_string()),
                None,
            ]),
        )
        .unwrap();
    let order = sort_indices(&table, &keys(&["year", "title"]), SortOrder::Descending).unwrap();
    assert_eq!(order, vec![1, 3, 0, 2]);
}

#[test]
fn dates_sort_descending_with_missing_last() {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    let mut table = Table::new(3);
    table
        .insert_column(
            "start",
            Column::Date(vec![date(2019, 1, 1), None, date(2022, 9, 1)]),
        )
        .unwrap();
    let sorted = sort_table(&table, &keys(&["start"]), SortOrder::Descending).unwrap();
    assert_eq!(
        sorted.column("start"),
        Some(&Column::Date(vec![date(2022, 9, 1), date(2019, 1, 1), None]))
    );
}

#[test]
fn mixed_types_order_by_rank() {
    let mut table = Table::new(4);
    table
        .insert_column(
            "key",
            Column::Dynamic(vec![
                Value::from("text"),
                Value::Float(1.5),
                Value::Bool(true),
                Value::Int(1),
            ]),
        )
        .unwrap();
    let order = sort_indices(&table, &keys(&["key"]), SortOrder::Ascending).unwrap();
    assert_eq!(order, vec![2, 3, 1, 0]);
}

#[test]
fn empty_table_sorts() {
    let mut table = Table::new(0);
    table.insert_column("year", Column::Integer(Vec::new())).unwrap();
    assert!(
        sort_indices(&table, &keys(&["year"]), SortOrder::Ascending)
            .unwrap()
            .is_empty()
    );
}

fn year_cell() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![1 => Just(None), 4 => (2015i64..2020).prop_map(Some)]
}

proptest! {
    #[test]
    fn sort_returns_a_permutation(
        years in prop::collection::vec(year_cell(), 0..40),
        descending in any::<bool>(),
    ) {
        let mut table = Table::new(years.len());
        table.insert_column("year", Column::Integer(years.clone())).unwrap();
        let order = if descending { SortOrder::Descending } else { SortOrder::Ascending };
        let mut indices = sort_indices(&table, &keys(&["year"]), order).unwrap();
        indices.sort_unstable();
        prop_assert_eq!(indices, (0..years.len()).collect::<Vec<_>>());
    }

    #[test]
    fn sort_is_stable_and_puts_missing_last(
        years in prop::collection::vec(year_cell(), 0..40),
        descending in any::<bool>(),
    ) {
        let mut table = Table::new(years.len());
        table.insert_column("year", Column::Integer(years.clone())).unwrap();
        let order = if descending { SortOrder::Descending } else { SortOrder::Ascending };
        let indices = sort_indices(&table, &keys(&["year"]), order).unwrap();

        for pair in indices.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match (years[a], years[b]) {
                (None, Some(_)) => prop_assert!(false, "missing sorted before a value"),
                (None, None) => prop_assert!(a < b),
                (Some(x), Some(y)) if x == y => prop_assert!(a < b),
                (Some(x), Some(y)) if descending => prop_assert!(x > y),
                (Some(x), Some(y)) => prop_assert!(x < y),
                (Some(_), None) => {}
            }
        }
    }
}
