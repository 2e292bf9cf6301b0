//! Subcommand entry points.

use std::path::Path;

use anyhow::{Context, Result};
use mdlist_cli::config::{AppConfig, Overrides, Settings};
use mdlist_cli::run::{
    OutputFormat, RenderRequest, categories_table, render_category, write_output,
};
use mdlist_core::Registry;

use crate::cli::{OutputFormatArg, RenderArgs};

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    Ok(AppConfig::discover(path, &cwd)?)
}

pub fn run_render(args: RenderArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let settings = Settings::resolve(
        &config.lists,
        Overrides {
            supervisor: args.supervisor,
            since_year: args.since_year,
            template_dir: args.templates,
        },
    );
    let request = RenderRequest {
        category: args.category,
        inputs: args.inputs,
        as_of: args.as_of,
        format: match args.format {
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Json => OutputFormat::Json,
        },
    };
    let text = render_category(&request, &settings)?;
    write_output(&text, args.output.as_deref())
}

pub fn run_categories(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let settings = Settings::resolve(&config.lists, Overrides::default());
    let registry = Registry::builtin(&settings.supervisor);
    println!("{}", categories_table(&registry));
    Ok(())
}
