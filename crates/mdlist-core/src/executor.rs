//! Pipeline executor.
//!
//! Runs one category's definition over a table:
//!
//! 1. Converter steps, in declared order
//! 2. Augmentor steps, in declared order
//! 3. Filter predicates, ANDed into a mask keyed by original row index
//! 4. Sort, producing a permutation of original row indices
//! 5. Clean and render each selected row in sorted order
//!
//! Any error aborts the run and no partial output is returned.

use std::time::Instant;

use mdlist_model::{Record, Table};
use mdlist_transform::{Mask, all_true, and_into, is_selected, selected_count, sort_indices};
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use crate::clean::clean_record;
use crate::context::ExecutionContext;
use crate::error::{PipelineError, Result};
use crate::registry::{PipelineDefinition, Registry};
use crate::render::Renderer;

/// A cleaned record ready for rendering, with its row index in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRow {
    pub row: usize,
    pub record: Record,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub category: String,
    pub rows_in: usize,
    pub rows_selected: usize,
    pub duration_ms: u128,
}

/// The ordered, cleaned output of a pipeline before rendering.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub template: String,
    pub rows: Vec<PreparedRow>,
    pub report: RunReport,
}

impl Prepared {
    /// The cleaned records, in output order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|row| &row.record)
    }
}

/// Runs registered pipelines against tables.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    registry: &'a Registry,
    ctx: ExecutionContext,
}

impl<'a> Executor<'a> {
    pub fn new(registry: &'a Registry, ctx: ExecutionContext) -> Self {
        Self { registry, ctx }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Run `category` over `table` and render every selected row.
    ///
    /// Each rendered fragment is followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnknownCategory`] for an unregistered
    /// category, [`PipelineError::Step`] when a step fails and
    /// [`PipelineError::Render`] when the renderer fails.
    pub fn execute<R: Renderer + ?Sized>(
        &self,
        category: &str,
        table: Table,
        renderer: &R,
    ) -> Result<String> {
        let prepared = self.prepare(category, table)?;
        let span = info_span!("render", category = %category, template = %prepared.template);
        let _guard = span.enter();
        let start = Instant::now();

        let mut text = String::new();
        for PreparedRow { row, record } in &prepared.rows {
            let fragment = renderer
                .render(&prepared.template, record)
                .map_err(|source| PipelineError::Render {
                    category: category.to_string(),
                    row: *row,
                    source,
                })?;
            trace!(row, bytes = fragment.len(), "rendered row");
            text.push_str(&fragment);
            text.push('\n');
        }

        debug!(
            category = %category,
            fragments = prepared.rows.len(),
            bytes = text.len(),
            duration_ms = start.elapsed().as_millis(),
            "render complete"
        );
        Ok(text)
    }

    /// Run `category` over `table` without rendering.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::UnknownCategory`] for an unregistered category
    /// and [`PipelineError::Step`] when a step, predicate or the sort fails.
    pub fn prepare(&self, category: &str, mut table: Table) -> Result<Prepared> {
        let definition = self
            .registry
            .get(category)
            .ok_or_else(|| PipelineError::UnknownCategory(category.to_string()))?;
        let span = info_span!("pipeline", category = %category);
        let _guard = span.enter();
        let start = Instant::now();
        let rows_in = table.height();

        apply_steps(category, definition, &mut table)?;
        let mask = self.filter_mask(category, definition, &table)?;
        let order = sort_indices(&table, &definition.sort.keys, definition.sort.order).map_err(
            |source| PipelineError::Step {
                category: category.to_string(),
                step: "sort",
                source,
            },
        )?;

        let rows: Vec<PreparedRow> = order
            .into_iter()
            .filter(|&row| is_selected(mask[row]))
            .map(|row| PreparedRow {
                row,
                record: clean_record(table.row(row)),
            })
            .collect();

        let report = RunReport {
            category: category.to_string(),
            rows_in,
            rows_selected: rows.len(),
            duration_ms: start.elapsed().as_millis(),
        };
        info!(
            category = %report.category,
            rows_in = report.rows_in,
            rows_selected = report.rows_selected,
            duration_ms = report.duration_ms,
            "pipeline complete"
        );

        Ok(Prepared {
            template: definition.template.clone(),
            rows,
            report,
        })
    }

    fn filter_mask(
        &self,
        category: &str,
        definition: &PipelineDefinition,
        table: &Table,
    ) -> Result<Mask> {
        let mut mask = all_true(table.height());
        for predicate in definition.filter.predicates() {
            if selected_count(&mask) == 0 {
                debug!(predicate = predicate.name(), "no rows left, skipping remaining predicates");
                break;
            }
            let next = predicate
                .evaluate(table, &self.ctx)
                .map_err(|source| PipelineError::Step {
                    category: category.to_string(),
                    step: predicate.name(),
                    source,
                })?;
            and_into(&mut mask, &next);
            debug!(
                predicate = predicate.name(),
                selected = selected_count(&mask),
                "applied predicate"
            );
        }
        Ok(mask)
    }
}

fn apply_steps(category: &str, definition: &PipelineDefinition, table: &mut Table) -> Result<()> {
    for step in definition.converters().chain(definition.augmentors()) {
        step.apply(table).map_err(|source| PipelineError::Step {
            category: category.to_string(),
            step: step.name(),
            source,
        })?;
        debug!(step = step.name(), columns = table.width(), "applied step");
    }
    Ok(())
}
