//! Tera-backed template rendering for mdlist.
//!
//! [`TemplateRenderer`] implements [`mdlist_core::Renderer`]. It starts from
//! the bundled list templates and can be overridden from a directory.

pub mod error;
pub mod renderer;
pub mod templates;

pub use error::{Result, TemplateError};
pub use renderer::TemplateRenderer;
pub use templates::{DEFAULT_EXTENSION, DEFAULT_TEMPLATES};
