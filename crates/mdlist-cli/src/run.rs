//! Command implementations shared by the binary and the tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use mdlist_core::{ExecutionContext, Executor, PipelineError, Predicate, Registry};
use mdlist_ingest::load_table;
use mdlist_model::Record;
use mdlist_render::TemplateRenderer;
use tracing::info;

use crate::config::Settings;

/// What `mdlist render` writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered template fragments.
    #[default]
    Markdown,
    /// The prepared records as a JSON array.
    Json,
}

#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub category: String,
    pub inputs: Vec<PathBuf>,
    /// Date used as "today". Defaults to the local date.
    pub as_of: Option<NaiveDate>,
    pub format: OutputFormat,
}

/// Load the inputs, run the category pipeline and return the output text.
///
/// # Errors
///
/// Fails on an unknown category, unreadable inputs or templates, and any
/// pipeline error.
pub fn render_category(request: &RenderRequest, settings: &Settings) -> Result<String> {
    let registry = Registry::builtin(&settings.supervisor);
    if registry.get(&request.category).is_none() {
        return Err(PipelineError::UnknownCategory(request.category.clone()).into());
    }
    let executor = Executor::new(&registry, execution_context(request.as_of, settings));

    let table = load_table(&request.inputs).context("failed to load input records")?;

    match request.format {
        OutputFormat::Markdown => {
            let renderer = build_renderer(settings)?;
            executor
                .execute(&request.category, table, &renderer)
                .with_context(|| format!("failed to build the `{}` list", request.category))
        }
        OutputFormat::Json => {
            let prepared = executor
                .prepare(&request.category, table)
                .with_context(|| format!("failed to build the `{}` list", request.category))?;
            let records: Vec<&Record> = prepared.records().collect();
            let mut text =
                serde_json::to_string_pretty(&records).context("failed to serialize records")?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn execution_context(as_of: Option<NaiveDate>, settings: &Settings) -> ExecutionContext {
    let ctx = as_of.map_or_else(ExecutionContext::now, ExecutionContext::new);
    match settings.since_year {
        Some(year) => ctx.with_since_year(year),
        None => ctx,
    }
}

/// The bundled templates under the configured extension, plus any overrides.
///
/// # Errors
///
/// Fails when a template cannot be read or parsed.
pub fn build_renderer(settings: &Settings) -> Result<TemplateRenderer> {
    let mut renderer = TemplateRenderer::with_extension(settings.extension.clone())
        .context("failed to load bundled templates")?;
    if let Some(dir) = &settings.template_dir {
        let loaded = renderer
            .load_dir(dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
        info!(dir = %dir.display(), loaded, "template overrides loaded");
    }
    Ok(renderer)
}

/// Write `text` to `output`, or to stdout when no path is given.
///
/// # Errors
///
/// Fails when the output cannot be written.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")
        }
    }
}

/// One row per registered category.
pub fn categories_table(registry: &Registry) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Template", "Sort keys", "Order", "Filter"]);
    apply_table_style(&mut table);
    for (category, definition) in registry.iter() {
        let filter = if definition.filter.is_empty() {
            "-".to_string()
        } else {
            definition
                .filter
                .predicates()
                .iter()
                .map(Predicate::name)
                .collect::<Vec<_>>()
                .join(" & ")
        };
        let order = if definition.sort.order.is_descending() {
            "desc"
        } else {
            "asc"
        };
        table.add_row(vec![
            category.to_string(),
            definition.template.clone(),
            definition.sort.keys.join(", "),
            order.to_string(),
            filter,
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}
