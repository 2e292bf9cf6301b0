//! End-to-end tests for the pipeline executor.

use std::cell::RefCell;

use chrono::NaiveDate;
use mdlist_core::{
    DEFAULT_SUPERVISOR, ExecutionContext, Executor, PipelineError, Prepared, Registry,
    RenderError, Renderer,
};
use mdlist_model::{Column, Record, Table, Value};
use mdlist_transform::TransformError;

/// Renders `template: key=value, ...` and remembers every call.
#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<String>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, template: &str, record: &Record) -> Result<String, RenderError> {
        let fields: Vec<String> = record
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        self.calls.borrow_mut().push(template.to_string());
        Ok(format!("{template}: {}", fields.join(", ")))
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, template: &str, _record: &Record) -> Result<String, RenderError> {
        Err(RenderError::TemplateNotFound(template.to_string()))
    }
}

fn ctx() -> ExecutionContext {
    ExecutionContext::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

fn record(fields: &[(&str, Value)]) -> Record {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

fn grants_table() -> Table {
    Table::from_records(vec![
        record(&[
            ("title", "Alpha".into()),
            ("start", Value::Int(2020)),
            ("end", Value::Int(2025)),
            ("amount", "50000".into()),
        ]),
        record(&[
            ("title", "Beta".into()),
            ("start", Value::Int(2019)),
            ("end", Value::Int(2022)),
            ("amount", Value::Int(12_000)),
        ]),
        record(&[("title", "Gamma".into()), ("start", "2023".into())]),
    ])
}

#[test]
fn grants_keep_current_and_open_ended() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let renderer = RecordingRenderer::default();
    let text = Executor::new(&registry, ctx())
        .execute("grants", grants_table(), &renderer)
        .expect("grants render");
    assert_eq!(
        text,
        "listgrant: start=2023-01-01, title=Gamma\n\
         listgrant: amount=50000, end=2025-12-31, start=2020-01-01, title=Alpha\n"
    );
    assert_eq!(renderer.calls.borrow().len(), 2);
}

#[test]
fn repeated_runs_give_identical_output() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let executor = Executor::new(&registry, ctx());
    let table = grants_table();
    let first = executor
        .execute("grants", table.clone(), &RecordingRenderer::default())
        .unwrap();
    let second = executor
        .execute("grants", table, &RecordingRenderer::default())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn exgrants_keep_only_finished() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let text = Executor::new(&registry, ctx())
        .execute("exgrants", grants_table(), &RecordingRenderer::default())
        .expect("exgrants render");
    assert_eq!(
        text,
        "listgrant: amount=12000, end=2022-12-31, start=2019-01-01, title=Beta\n"
    );
}

#[test]
fn prepared_records_are_clean_and_ordered() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let prepared = Executor::new(&registry, ctx())
        .prepare("grants", grants_table())
        .expect("grants prepare");
    assert_eq!(prepared.template, "listgrant");
    assert_eq!(prepared.report.rows_in, 3);
    assert_eq!(prepared.report.rows_selected, 2);
    let rows: Vec<usize> = prepared.rows.iter().map(|row| row.row).collect();
    assert_eq!(rows, vec![2, 0]);

    let records: Vec<&Record> = prepared.records().collect();
    insta::assert_json_snapshot!(records, @r#"
    [
      {
        "start": "2023-01-01",
        "title": "Gamma"
      },
      {
        "amount": 50000,
        "end": "2025-12-31",
        "start": "2020-01-01",
        "title": "Alpha"
      }
    ]
    "#);
}

#[test]
fn talks_derive_month_and_year_and_filter_by_recency() {
    let table = Table::from_records(vec![
        record(&[("title", "Old".into()), ("date", "2015-03-02".into())]),
        record(&[("title", "New".into()), ("date", "2021-09-14".into())]),
        record(&[("title", "Undated".into())]),
    ]);
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let text = Executor::new(&registry, ctx())
        .execute("talks", table, &RecordingRenderer::default())
        .expect("talks render");
    assert_eq!(
        text,
        "listtalk: date=2021-09-14, month=September, title=New, year=2021\n"
    );
}

#[test]
fn since_year_widens_the_window() {
    let table = Table::from_records(vec![
        record(&[("title", "Old".into()), ("date", "2015-03-02".into())]),
        record(&[("title", "New".into()), ("date", "2021-09-14".into())]),
    ]);
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let prepared = Executor::new(&registry, ctx().with_since_year(2010))
        .prepare("talks", table)
        .expect("talks prepare");
    let titles: Vec<Value> = prepared
        .records()
        .map(|record| record["title"].clone())
        .collect();
    assert_eq!(titles, vec![Value::from("New"), Value::from("Old")]);
}

#[test]
fn publications_keep_curated_year() {
    let table = Table::from_records(vec![
        record(&[
            ("title", "Preprint".into()),
            ("year", "2022".into()),
            ("published", "2023-02-01".into()),
        ]),
        record(&[("title", "Journal".into()), ("published", "2020-07-15".into())]),
        record(&[("title", "Ancient".into()), ("year", Value::Int(2001))]),
    ]);
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let prepared = Executor::new(&registry, ctx())
        .prepare("publications", table)
        .expect("publications prepare");
    let summary: Vec<(Value, Value, Value)> = prepared
        .records()
        .map(|record| {
            (
                record["title"].clone(),
                record["year"].clone(),
                record["month"].clone(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Preprint".into(), Value::Int(2022), "February".into()),
            ("Journal".into(), Value::Int(2020), "July".into()),
        ]
    );
}

fn people_table() -> Table {
    Table::from_records(vec![
        record(&[
            ("name", "Ada".into()),
            ("position", "PhD Student".into()),
            ("start", "2021-10-01".into()),
        ]),
        record(&[
            ("name", "Brook".into()),
            ("position", "PhD Student".into()),
            ("start", "2016-10-01".into()),
            ("end", "2020-09-30".into()),
            ("supervisor", Value::List(vec!["abc12".into(), "ndl21".into()])),
        ]),
        record(&[
            ("name", "Cam".into()),
            ("position", "PhD Student".into()),
            ("start", "2022-10-01".into()),
            ("supervisor", "abc12".into()),
        ]),
        record(&[
            ("name", "Dee".into()),
            ("position", "Research Associate".into()),
            ("start", "2015-01-01".into()),
            ("end", "2019-01-01".into()),
            ("current", Value::Bool(true)),
        ]),
    ])
}

fn names(prepared: &Prepared) -> Vec<String> {
    prepared
        .records()
        .map(|record| record["name"].to_string())
        .collect()
}

#[test]
fn people_lists_split_by_position_and_tenure() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let executor = Executor::new(&registry, ctx());

    let students = executor.prepare("students", people_table()).unwrap();
    assert_eq!(names(&students), vec!["Ada"]);
    assert_eq!(students.template, "liststudent");

    let exstudents = executor.prepare("exstudents", people_table()).unwrap();
    assert_eq!(names(&exstudents), vec!["Brook"]);

    // The flag keeps Dee current; former ignores it.
    let pdras = executor.prepare("pdras", people_table()).unwrap();
    assert_eq!(names(&pdras), vec!["Dee"]);
    assert_eq!(pdras.template, "listpdra");
    let expdras = executor.prepare("expdras", people_table()).unwrap();
    assert_eq!(names(&expdras), vec!["Dee"]);
}

#[test]
fn configured_supervisor_changes_the_filter() {
    let registry = Registry::builtin("abc12");
    let students = Executor::new(&registry, ctx())
        .prepare("students", people_table())
        .unwrap();
    assert_eq!(names(&students), vec!["Cam", "Ada"]);
}

#[test]
fn output_count_matches_selected_rows() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let executor = Executor::new(&registry, ctx());
    let renderer = RecordingRenderer::default();
    let text = executor.execute("grants", grants_table(), &renderer).unwrap();
    let prepared = executor.prepare("grants", grants_table()).unwrap();
    assert_eq!(text.lines().count(), prepared.report.rows_selected);
    assert_eq!(renderer.calls.borrow().len(), prepared.report.rows_selected);
}

#[test]
fn unknown_category_is_fatal() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let renderer = RecordingRenderer::default();
    let err = Executor::new(&registry, ctx())
        .execute("posters", grants_table(), &renderer)
        .unwrap_err();
    assert!(matches!(err, PipelineError::UnknownCategory(ref name) if name == "posters"));
    assert!(renderer.calls.borrow().is_empty());
}

#[test]
fn step_errors_name_category_and_step() {
    let table = Table::from_records(vec![record(&[
        ("title", "Odd".into()),
        ("start", Value::Float(2020.5)),
    ])]);
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let err = Executor::new(&registry, ctx())
        .execute("grants", table, &RecordingRenderer::default())
        .unwrap_err();
    match err {
        PipelineError::Step {
            category,
            step,
            source,
        } => {
            assert_eq!(category, "grants");
            assert_eq!(step, "year_to_iso");
            assert!(matches!(
                source,
                TransformError::TypeMismatch { row: 0, .. }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_sort_key_is_fatal() {
    let table = Table::from_records(vec![record(&[("title", "No dates".into())])]);
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let err = Executor::new(&registry, ctx())
        .prepare("talks", table)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Step {
            step: "sort",
            source: TransformError::MissingColumn(_),
            ..
        }
    ));
}

#[test]
fn render_errors_abort_without_output() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let err = Executor::new(&registry, ctx())
        .execute("grants", grants_table(), &FailingRenderer)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Render { row: 2, .. }
    ));
}

#[test]
fn empty_table_renders_nothing() {
    let registry = Registry::builtin(DEFAULT_SUPERVISOR);
    let mut table = Table::new(0);
    table
        .insert_column("date", Column::Dynamic(Vec::new()))
        .unwrap();
    let text = Executor::new(&registry, ctx())
        .execute("talks", table, &RecordingRenderer::default())
        .unwrap();
    assert!(text.is_empty());
}
