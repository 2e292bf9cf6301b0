//! The seam between the executor and a template engine.

use mdlist_model::Record;
use thiserror::Error;

/// Errors a [`Renderer`] may report.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("failed to render template {template}: {message}")]
    Template { template: String, message: String },
}

/// Renders one cleaned record through a named template.
pub trait Renderer {
    /// Render `record` with `template`, where `template` is a list template
    /// name such as `listtalk` without its file extension.
    fn render(&self, template: &str, record: &Record) -> Result<String, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, template: &str, record: &Record) -> Result<String, RenderError> {
        (**self).render(template, record)
    }
}
