//! # error-page
//!
//! Human-readable HTML error pages for axum services, with content negotiation.
//!
//! Handlers fail with an [`HttpException`], which is sent as a JSON payload
//! (`{"statusCode":..,"error":..,"message":..}`). The [`ErrorPagePlugin`]
//! installs a pre-response hook that looks at the client's `Accept` header:
//! browsers asking for `text/html` get the error rendered through your
//! template engine instead, with the same status code and headers. The
//! router's own error responses (unknown routes, rejected extractors) get the
//! page too. API clients keep receiving the original body untouched.
//!
//! ## Features
//!
//! - **Content negotiation**: `Accept` parsing with `q` and specificity ranking,
//!   and a selectable [`NegotiationPolicy`]
//! - **Friendly messages**: canned error messages are replaced with readable
//!   explanations per status code
//! - **Bring your own templates**: rendering goes through the [`ViewRenderer`] trait
//! - **Authentication aware**: the template learns whether the user is logged in
//!   when an [`AuthStrategy`] is installed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use error_page::prelude::*;
//!
//! async fn handler() -> Result<String, HttpException> {
//!     Err(HttpException::not_found("No such user"))
//! }
//!
//! #[tokio::main]
//! async fn main() -> error_page::Result<()> {
//!     let mut registry = PluginRegistry::new();
//!     registry.views(FnRenderer::new(|_template, context| {
//!         Ok(format!("<h1>{}</h1><p>{}</p>", context["title"], context["message"]))
//!     }));
//!     // fails here, at startup, when no renderer is registered
//!     registry.register(ErrorPagePlugin::default())?;
//!
//!     let app: Router = Router::new()
//!         .route("/users/{id}", axum::routing::get(handler))
//!         .layer(registry.into_layer());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod di;
pub mod error;
pub mod error_page;
pub mod exception;
pub mod interceptor;
pub mod negotiation;
pub mod plugin;
pub mod view;

// Re-export core types
pub use auth::{AuthStrategy, Authentication};
pub use config::{ConfigService, ErrorPageOptions};
pub use error::{ErrorPageError, Result};
pub use error_page::{ErrorPage, ErrorPagePlugin, RenderContext, explain};
pub use exception::{ErrorOutput, ErrorPayload, HttpException};
pub use negotiation::{NegotiationPolicy, prefers_html};
pub use plugin::{Plugin, PluginRegistry};
pub use view::{FnRenderer, ViewRenderer};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use error_page::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{AuthError, AuthResult, AuthStrategy, Authentication};
    pub use crate::config::{ConfigService, ErrorPageOptions};
    pub use crate::di::Container;
    pub use crate::error::ErrorPageError;
    pub use crate::error_page::{ErrorPage, ErrorPagePlugin, RenderContext};
    pub use crate::exception::{
        ErrorOutput, ErrorPayload, ExceptionFilter, HttpException, HttpExceptionFilter,
    };
    pub use crate::interceptor::{Interceptor, InterceptorResult, Next, SharedInterceptorLayer};
    pub use crate::negotiation::{NegotiationPolicy, prefers_html};
    pub use crate::plugin::{Plugin, PluginRegistry};
    pub use crate::view::{FnRenderer, RenderError, RenderResult, ViewRenderer};
    pub use async_trait::async_trait;
    pub use axum::{
        Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
