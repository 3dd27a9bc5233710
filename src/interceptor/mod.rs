use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;

mod layer;

pub use layer::{InterceptorMiddleware, SharedInterceptorLayer};

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = crate::exception::ExceptionError;

type NextFn =
    Box<dyn FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>> + Send>;

/// Represents the next handler in the chain
pub struct Next {
    pub(crate) run: NextFn,
}

impl Next {
    /// Create a new Next handler
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> Pin<Box<dyn Future<Output = InterceptorResult> + Send>>
            + Send
            + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors see the request before it reaches the handler and the
/// response before it is sent. Returning the response from `next`
/// untouched lets it continue; returning another one replaces it.
///
/// # Example
/// ```
/// use error_page::interceptor::{Interceptor, InterceptorResult, Next};
/// use error_page::async_trait;
/// use axum::{body::Body, http::Request};
///
/// struct PoweredBy;
///
/// #[async_trait]
/// impl Interceptor for PoweredBy {
///     async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
///         let mut response = next.run(request).await?;
///         response
///             .headers_mut()
///             .insert("x-powered-by", "axum".parse().unwrap());
///         Ok(response)
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
