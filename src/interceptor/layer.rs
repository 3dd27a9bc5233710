use crate::exception::{ExceptionFilter, HttpExceptionFilter};
use crate::interceptor::{Interceptor, InterceptorError, InterceptorResult, Next};
use axum::{body::Body, http::Request, response::Response};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer running a chain of Interceptors around the inner service.
///
/// `interceptors[0]` is outermost. Errors that escape the chain are turned
/// into responses by the exception filter, so the service never fails.
#[derive(Clone)]
pub struct SharedInterceptorLayer {
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
    filter: Arc<dyn ExceptionFilter>,
}

impl SharedInterceptorLayer {
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self {
            interceptors: Arc::new(interceptors),
            filter: Arc::new(HttpExceptionFilter),
        }
    }

    /// Replace the default [`HttpExceptionFilter`].
    pub fn with_filter(mut self, filter: impl ExceptionFilter) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl<S> Layer<S> for SharedInterceptorLayer {
    type Service = InterceptorMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InterceptorMiddleware {
            inner,
            interceptors: self.interceptors.clone(),
            filter: self.filter.clone(),
        }
    }
}

#[derive(Clone)]
pub struct InterceptorMiddleware<S> {
    inner: S,
    interceptors: Arc<Vec<Box<dyn Interceptor>>>,
    filter: Arc<dyn ExceptionFilter>,
}

impl<S> Service<Request<Body>> for InterceptorMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<InterceptorError> + Send,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // readiness is driven on the clone taken in `call`
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let interceptors = self.interceptors.clone();
        let filter = self.filter.clone();
        // take the clone, leave the ready service for the caller
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            // Base of the chain: the inner service.
            let mut chain = Next::new(move |req| {
                let mut inner = inner;
                Box::pin(async move {
                    std::future::poll_fn(|cx| inner.poll_ready(cx))
                        .await
                        .map_err(Into::<InterceptorError>::into)?;
                    let response = inner
                        .call(req)
                        .await
                        .map_err(Into::<InterceptorError>::into)?;
                    Ok::<_, InterceptorError>(response)
                })
            });

            // Wrap from the innermost interceptor outwards.
            for i in (0..interceptors.len()).rev() {
                let interceptors_arc = interceptors.clone();
                let next_chain = chain;

                chain = Next::new(move |req| {
                    Box::pin(async move {
                        let interceptor = &interceptors_arc[i];
                        interceptor.intercept(req, next_chain).await
                    })
                });
            }

            let result: InterceptorResult = chain.run(request).await;
            Ok(result.unwrap_or_else(|error| filter.catch(error)))
        })
    }
}
