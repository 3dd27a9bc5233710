//! Template rendering capability
//!
//! The crate never produces HTML itself. Hosts register a [`ViewRenderer`]
//! (a template engine binding) and plugins render named templates through it.

use async_trait::async_trait;
use serde_json::Value;

pub type RenderResult = Result<String, RenderError>;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid render context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Renders a named template with a data context.
#[async_trait]
pub trait ViewRenderer: Send + Sync + 'static {
    async fn render(&self, template: &str, context: &Value) -> RenderResult;
}

/// Adapts a plain function or closure into a [`ViewRenderer`].
///
/// # Example
/// ```
/// use error_page::view::{FnRenderer, RenderError};
///
/// let views = FnRenderer::new(|template, context| match template {
///     "error" => Ok(format!("<h1>{}</h1>", context["title"].as_str().unwrap_or(""))),
///     other => Err(RenderError::TemplateNotFound(other.to_string())),
/// });
/// ```
pub struct FnRenderer<F> {
    render: F,
}

impl<F> FnRenderer<F>
where
    F: Fn(&str, &Value) -> RenderResult + Send + Sync + 'static,
{
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

#[async_trait]
impl<F> ViewRenderer for FnRenderer<F>
where
    F: Fn(&str, &Value) -> RenderResult + Send + Sync + 'static,
{
    async fn render(&self, template: &str, context: &Value) -> RenderResult {
        (self.render)(template, context)
    }
}
