use crate::interceptor::{Interceptor, InterceptorResult, Next};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, request::Parts},
};

/// Standard Result type for AuthStrategy
/// Ok(()) means the request carries valid credentials
pub type AuthResult = Result<(), AuthError>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    Missing,

    #[error("Invalid credentials: {0}")]
    Invalid(String),
}

/// Authentication state of the current request.
///
/// Present in the request extensions only when the host has an
/// [`AuthStrategy`] installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authentication {
    pub is_authenticated: bool,
}

/// The AuthStrategy trait
/// Implement this to tell whether a request is authenticated
#[async_trait]
pub trait AuthStrategy: Send + Sync + 'static {
    async fn authenticate(&self, parts: &Parts) -> AuthResult;
}

/// Runs an [`AuthStrategy`] and records the outcome as [`Authentication`].
///
/// Never rejects: unauthenticated requests continue with
/// `is_authenticated == false`.
pub struct AuthInterceptor<A> {
    strategy: A,
}

impl<A: AuthStrategy> AuthInterceptor<A> {
    pub fn new(strategy: A) -> Self {
        Self { strategy }
    }
}

#[async_trait]
impl<A: AuthStrategy> Interceptor for AuthInterceptor<A> {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        let (mut parts, body) = request.into_parts();
        let is_authenticated = match self.strategy.authenticate(&parts).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(reason = %e, "Request not authenticated");
                false
            }
        };
        parts.extensions.insert(Authentication { is_authenticated });
        next.run(Request::from_parts(parts, body)).await
    }
}
