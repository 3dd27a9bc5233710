//! HTML error pages
//!
//! [`ErrorPage`] is a pre-response hook. For every error response it checks
//! the request's `Accept` header and, when the client prefers HTML, replaces
//! the error body with the rendered error template:
//!
//! ```text
//! handler ─► HttpException ─► JSON response + ErrorOutput
//! router  ─► 4xx/5xx (unknown route, rejected extractor, ...)
//!                                   │
//!                     prefers_html(Accept)? ── no ──► sent unchanged
//!                                   │ yes
//!                                   ▼
//!          RenderContext ─► ViewRenderer("error") ─► HTML, same status + headers
//! ```
//!
//! Error responses that don't carry an [`ErrorOutput`] are described by
//! their status code alone. Successful responses are never touched.

mod context;
mod explanation;

pub use context::{RenderContext, UNKNOWN_MESSAGE, UNKNOWN_TITLE, to_sentence};
pub use explanation::explain;

use crate::auth::Authentication;
use crate::config::ErrorPageOptions;
use crate::error::{ErrorPageError, Result};
use crate::exception::{ErrorOutput, HttpException};
use crate::interceptor::{Interceptor, InterceptorResult, Next};
use crate::negotiation::prefers_html;
use crate::plugin::{Plugin, PluginRegistry};
use crate::view::{RenderError, ViewRenderer};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

/// Pre-response hook rendering HTML error pages.
pub struct ErrorPage {
    views: Arc<dyn ViewRenderer>,
    options: ErrorPageOptions,
}

impl ErrorPage {
    pub fn new(views: Arc<dyn ViewRenderer>, options: ErrorPageOptions) -> Self {
        Self { views, options }
    }

    /// Render `output` as an HTML page with its status code.
    ///
    /// Every header of the original response is carried over except the
    /// ones describing its body.
    pub async fn render(
        &self,
        output: ErrorOutput,
        original: &HeaderMap,
        auth: Option<Authentication>,
    ) -> std::result::Result<Response, RenderError> {
        let context = RenderContext::new(&output.payload, auth);
        let data = serde_json::to_value(&context)?;
        let html = self.views.render(&self.options.template, &data).await?;

        let mut page = Html(html).into_response();
        *page.status_mut() =
            StatusCode::from_u16(context.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = page.headers_mut();
        for (name, value) in original {
            if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
                continue;
            }
            headers.append(name, value.clone());
        }
        page.extensions_mut().insert(output);
        Ok(page)
    }
}

#[async_trait]
impl Interceptor for ErrorPage {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let accept = request.headers().get(header::ACCEPT).cloned();
        let auth = request.extensions().get::<Authentication>().copied();

        let response = match next.run(request).await {
            Ok(response) => response,
            Err(error) => HttpException::from_error(error).into_response(),
        };

        let status = response.status();
        let output = match response.extensions().get::<ErrorOutput>() {
            Some(output) => output.clone(),
            None if status.is_client_error() || status.is_server_error() => {
                ErrorOutput::for_status(status)
            }
            None => return Ok(response),
        };

        let accept = accept.as_ref().and_then(|value| value.to_str().ok());
        if !prefers_html(accept, self.options.negotiation) {
            tracing::debug!(
                status = output.payload.status_code,
                accept = ?accept,
                "Client does not prefer HTML, keeping error payload"
            );
            return Ok(response);
        }

        match self.render(output, response.headers(), auth).await {
            Ok(page) => Ok(page),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    template = %self.options.template,
                    "Failed to render error page"
                );
                Err(e.into())
            }
        }
    }
}

/// Plugin installing [`ErrorPage`]; requires a registered [`ViewRenderer`].
#[derive(Debug, Clone, Default)]
pub struct ErrorPagePlugin {
    options: ErrorPageOptions,
}

impl ErrorPagePlugin {
    pub fn new(options: ErrorPageOptions) -> Self {
        Self { options }
    }
}

impl Plugin for ErrorPagePlugin {
    const NAME: &'static str = "error-page";

    fn register(self, registry: &mut PluginRegistry) -> Result<()> {
        let views = registry
            .container()
            .resolve::<dyn ViewRenderer>()
            .map_err(|_| ErrorPageError::missing_dependency(Self::NAME, "view-renderer"))?;

        registry.ext_pre_response(ErrorPage::new(views, self.options));
        Ok(())
    }
}
