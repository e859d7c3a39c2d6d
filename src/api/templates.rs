//! HTML templates.
//!
//! Templates are compiled into the binary and loaded into a single
//! `minijinja` environment at startup.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// Template for the task list page.
pub const INDEX_TEMPLATE: &str = "index.html";

const INDEX_SOURCE: &str = include_str!("../../templates/index.html");

/// Template loading or rendering failure.
#[derive(Debug, Error)]
#[error("Template error: {0}")]
pub struct TemplateError(#[from] minijinja::Error);

/// Compiled template set.
#[derive(Debug)]
pub struct Templates {
    environment: Environment<'static>,
}

impl Templates {
    /// Compiles the bundled templates.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if a template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut environment = Environment::new();
        environment.add_template(INDEX_TEMPLATE, INDEX_SOURCE)?;
        Ok(Self { environment })
    }

    /// Renders `name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if the template is unknown or rendering fails.
    pub fn render<C: Serialize>(&self, name: &str, context: C) -> Result<String, TemplateError> {
        let template = self.environment.get_template(name)?;
        Ok(template.render(context)?)
    }
}
