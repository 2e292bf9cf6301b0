//! Tests for converters and augmentors.

use chrono::NaiveDate;
use mdlist_model::{Column, Table, Value};
use mdlist_transform::augmentors::{
    add_columns, add_month, add_year, fill_constant, fill_month, fill_year,
};
use mdlist_transform::converters::{
    to_date, to_integer, to_text, year_to_iso, year_to_new_year_day,
};
use mdlist_transform::TransformError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn single(name: &str, values: Vec<Value>) -> Table {
    let mut table = Table::new(values.len());
    table
        .insert_column(name, Column::Dynamic(values))
        .expect("column fits");
    table
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn to_date_parses_and_blanks_garbage() {
    let mut table = single(
        "date",
        vec![
            "2021-05-17".into(),
            "soon".into(),
            Value::Missing,
            Value::Int(2019),
        ],
    );
    to_date(&mut table, &names(&["date"]));
    assert_eq!(
        table.column("date"),
        Some(&Column::Date(vec![
            Some(date(2021, 5, 17)),
            None,
            None,
            Some(date(2019, 1, 1)),
        ]))
    );
}

#[test]
fn converters_skip_absent_columns() {
    let mut table = single("title", vec!["A talk".into()]);
    to_date(&mut table, &names(&["date", "published"]));
    to_integer(&mut table, &names(&["year"]));
    year_to_iso(&mut table, "start", 1, 1).expect("absent column is a no-op");
    assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn to_integer_is_nullable() {
    let mut table = single(
        "amount",
        vec!["50000".into(), Value::Float(12.7), "n/a".into(), Value::Missing],
    );
    to_integer(&mut table, &names(&["amount"]));
    assert_eq!(
        table.column("amount"),
        Some(&Column::Integer(vec![Some(50_000), Some(12), None, None]))
    );
}

#[test]
fn to_text_keeps_missing() {
    let mut table = single(
        "semester",
        vec![Value::Int(1), Value::Date(date(2020, 1, 2)), Value::Missing],
    );
    to_text(&mut table, &names(&["semester"]));
    assert_eq!(
        table.column("semester"),
        Some(&Column::Text(vec![
            Some("1".to_string()),
            Some("2020-01-02".to_string()),
            None,
        ]))
    );
}

#[test]
fn year_to_new_year_day_only_touches_years() {
    let mut table = single(
        "start",
        vec![Value::Int(2019), "2020".into(), "2021-03-04".into(), Value::Missing],
    );
    year_to_new_year_day(&mut table, &names(&["start"]));
    let cells: Vec<Value> = table.column("start").unwrap().iter().collect();
    assert_eq!(
        cells,
        vec![
            Value::from("2019-01-01"),
            Value::from("2020-01-01"),
            Value::from("2021-03-04"),
            Value::Missing,
        ]
    );
}

#[test]
fn year_to_iso_uses_supplied_month_and_day() {
    let mut table = single(
        "end",
        vec![
            Value::Int(2023),
            "2024".into(),
            "2022-06-30".into(),
            Value::Date(date(2021, 2, 3)),
            Value::Missing,
        ],
    );
    year_to_iso(&mut table, "end", 12, 31).expect("years convert");
    assert_eq!(
        table.column("end"),
        Some(&Column::Date(vec![
            Some(date(2023, 12, 31)),
            Some(date(2024, 12, 31)),
            Some(date(2022, 6, 30)),
            Some(date(2021, 2, 3)),
            None,
        ]))
    );
}

#[test]
fn year_to_iso_rejects_bad_text() {
    let mut table = single("start", vec![Value::Int(2020), "next year".into()]);
    let err = year_to_iso(&mut table, "start", 1, 1).unwrap_err();
    match err {
        TransformError::InvalidDate { column, row, value } => {
            assert_eq!(column, "start");
            assert_eq!(row, 1);
            assert_eq!(value, "next year");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn year_to_iso_rejects_floats() {
    let mut table = single("start", vec![Value::Float(2020.5)]);
    let err = year_to_iso(&mut table, "start", 1, 1).unwrap_err();
    assert!(matches!(
        err,
        TransformError::TypeMismatch { row: 0, found: "float", .. }
    ));
}

#[test]
fn year_to_iso_rejects_impossible_day() {
    let mut table = single("end", vec![Value::Int(2023)]);
    let err = year_to_iso(&mut table, "end", 2, 30).unwrap_err();
    assert!(matches!(err, TransformError::InvalidDate { .. }));
}

#[test]
fn add_month_and_year_overwrite_targets() {
    let mut table = single(
        "date",
        vec![Value::Date(date(2020, 3, 9)), Value::Missing],
    );
    table
        .insert_column("year", Column::Integer(vec![Some(1999), Some(1999)]))
        .unwrap();
    add_month(&mut table, "date", "month").unwrap();
    add_year(&mut table, "date", "year").unwrap();
    assert_eq!(table.get(0, "month"), Value::from("March"));
    assert_eq!(table.get(1, "month"), Value::Missing);
    assert_eq!(table.get(0, "year"), Value::Int(2020));
    assert_eq!(table.get(1, "year"), Value::Missing);
}

#[test]
fn fill_year_keeps_curated_values() {
    let mut table = single(
        "published",
        vec![
            Value::Date(date(2018, 7, 1)),
            Value::Date(date(2019, 8, 1)),
            Value::Missing,
        ],
    );
    table
        .insert_column("year", Column::Integer(vec![Some(2017), None, None]))
        .unwrap();
    fill_year(&mut table, "published", "year").unwrap();
    fill_month(&mut table, "published", "month").unwrap();
    assert_eq!(
        table.column("year"),
        Some(&Column::Integer(vec![Some(2017), Some(2019), None]))
    );
    assert_eq!(
        table.column("month"),
        Some(&Column::Text(vec![
            Some("July".to_string()),
            Some("August".to_string()),
            None,
        ]))
    );
}

#[test]
fn augmentors_reject_undated_sources() {
    let mut table = single("date", vec!["2020-01-01".into()]);
    let err = add_year(&mut table, "date", "year").unwrap_err();
    assert!(matches!(
        err,
        TransformError::TypeMismatch { expected: "date", found: "text", .. }
    ));
}

#[test]
fn fill_constant_creates_and_fills() {
    let mut table = single(
        "supervisor",
        vec![Value::Missing, "abc12".into()],
    );
    fill_constant(&mut table, "supervisor", &Value::from("ndl21"));
    fill_constant(&mut table, "group", &Value::from("ML"));
    assert_eq!(table.get(0, "supervisor"), Value::from("ndl21"));
    assert_eq!(table.get(1, "supervisor"), Value::from("abc12"));
    assert_eq!(table.get(1, "group"), Value::from("ML"));
}

#[test]
fn add_columns_leaves_existing_data() {
    let mut table = single("semester", vec!["Spring".into()]);
    add_columns(&mut table, &names(&["semester", "venue"]));
    assert_eq!(table.get(0, "semester"), Value::from("Spring"));
    assert!(table.has_column("venue"));
    assert_eq!(table.get(0, "venue"), Value::Missing);
}
