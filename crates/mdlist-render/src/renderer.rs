//! The Tera renderer.

use std::error::Error as _;
use std::path::Path;

use mdlist_core::{RenderError, Renderer};
use mdlist_model::Record;
use tera::{Context, Tera};
use tracing::{debug, trace};

use crate::error::{Result, TemplateError};
use crate::templates::{DEFAULT_EXTENSION, DEFAULT_TEMPLATES};

/// Renders records through Tera templates named `<name><extension>`.
#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
    extension: String,
}

impl TemplateRenderer {
    /// Renderer holding only the bundled templates, with the `.md` extension.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] if a bundled template fails to parse.
    pub fn new() -> Result<Self> {
        Self::with_extension(DEFAULT_EXTENSION)
    }

    /// Renderer holding the bundled templates under `extension`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] if a bundled template fails to parse.
    pub fn with_extension(extension: impl Into<String>) -> Result<Self> {
        let mut renderer = Self {
            tera: Tera::default(),
            extension: extension.into(),
        };
        for (name, source) in DEFAULT_TEMPLATES {
            let file_name = renderer.file_name(name);
            renderer.add_template(&file_name, source)?;
        }
        Ok(renderer)
    }

    /// Add every file in `dir` ending in the configured extension,
    /// replacing bundled templates of the same name.
    ///
    /// Subdirectories are not scanned.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a template cannot be read, or if
    /// a template fails to parse.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(TemplateError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let entries = std::fs::read_dir(dir).map_err(|source| TemplateError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0usize;
        for entry in entries {
            let entry = entry.map_err(|source| TemplateError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !file_name.ends_with(&self.extension) {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                path: path.clone(),
                source,
            })?;
            self.add_template(file_name, &source)?;
            loaded += 1;
        }
        debug!(dir = %dir.display(), loaded, "loaded template overrides");
        Ok(loaded)
    }

    /// Add or replace one template. `file_name` includes the extension.
    ///
    /// A single trailing line break is dropped so that each rendered
    /// fragment is one line.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] if the template fails to parse.
    pub fn add_template(&mut self, file_name: &str, source: &str) -> Result<()> {
        let source = source
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(source);
        self.tera
            .add_raw_template(file_name, source)
            .map_err(|source| TemplateError::Parse {
                name: file_name.to_string(),
                source,
            })?;
        trace!(template = %file_name, "registered template");
        Ok(())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Registered template names, extension included, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    fn file_name(&self, template: &str) -> String {
        format!("{template}{}", self.extension)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, template: &str, record: &Record) -> std::result::Result<String, RenderError> {
        let file_name = self.file_name(template);
        if !self.tera.get_template_names().any(|name| name == file_name) {
            return Err(RenderError::TemplateNotFound(file_name));
        }
        let context = Context::from_serialize(record).map_err(|err| RenderError::Template {
            template: file_name.clone(),
            message: error_chain(&err),
        })?;
        self.tera
            .render(&file_name, &context)
            .map_err(|err| RenderError::Template {
                template: file_name,
                message: error_chain(&err),
            })
    }
}

/// Tera reports the useful detail in nested sources.
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
