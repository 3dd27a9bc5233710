use axum::response::Response;
use std::error::Error;

pub mod http;

pub use http::{ErrorOutput, ErrorPayload, HttpException, HttpExceptionFilter};

/// A type-erased error escaping the handler chain
pub type ExceptionError = Box<dyn Error + Send + Sync>;

/// The ExceptionFilter trait
///
/// Filters handle errors that escape request processing.
/// They must return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, error: ExceptionError) -> Response;
}
