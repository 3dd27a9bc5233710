use crate::exception::{ExceptionError, ExceptionFilter};
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message sent in place of the real one for every 5xx error.
pub const MASKED_SERVER_MESSAGE: &str = "An internal server error occurred";

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Structured body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

/// Response extension marking a response as an error response.
///
/// `headers` carries the error's own headers (e.g. `WWW-Authenticate`),
/// not the ones describing the JSON body.
#[derive(Debug, Clone)]
pub struct ErrorOutput {
    pub payload: ErrorPayload,
    pub headers: HeaderMap,
}

impl ErrorOutput {
    /// Describe an error response that only carries a status code.
    pub fn for_status(status: StatusCode) -> Self {
        Self {
            payload: HttpException::new(status).payload(),
            headers: HeaderMap::new(),
        }
    }
}

/// An HTTP error raised by a handler.
///
/// Turns into a JSON [`ErrorPayload`] response that carries an
/// [`ErrorOutput`] extension, so response hooks can recognise it.
///
/// # Example
/// ```
/// use error_page::exception::HttpException;
///
/// async fn show_user() -> Result<String, HttpException> {
///     Err(HttpException::not_found("No such user"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpException {
    status: StatusCode,
    message: Option<String>,
    headers: HeaderMap,
}

impl HttpException {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status).message(message)
    }

    /// Set a custom message. Empty messages are ignored.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.is_empty() {
            self.message = Some(message);
        }
        self
    }

    /// Attach a header that must reach the client whatever the body format.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    /// 401 with a `WWW-Authenticate` challenge for `scheme`.
    pub fn unauthorized(scheme: &str) -> Self {
        let error = Self::new(StatusCode::UNAUTHORIZED);
        match HeaderValue::from_str(scheme) {
            Ok(challenge) => error.header(header::WWW_AUTHENTICATE, challenge),
            Err(_) => error,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Recover an `HttpException` from a type-erased error, or wrap it in a 500.
    pub fn from_error(error: ExceptionError) -> Self {
        match error.downcast::<HttpException>() {
            Ok(exception) => *exception,
            Err(other) => {
                tracing::error!(error = %other, "Unhandled error mapped to 500");
                Self::internal(other.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body as the client sees it.
    pub fn payload(&self) -> ErrorPayload {
        let error = self
            .status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let message = if self.status.is_server_error() {
            MASKED_SERVER_MESSAGE.to_string()
        } else {
            self.message.clone().unwrap_or_else(|| error.clone())
        };
        ErrorPayload {
            status_code: self.status.as_u16(),
            error,
            message,
        }
    }
}

impl fmt::Display for HttpException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.status, message),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for HttpException {}

impl IntoResponse for HttpException {
    fn into_response(self) -> Response {
        let payload = self.payload();
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize error payload");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            headers.append(name, value.clone());
        }
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        response.extensions_mut().insert(ErrorOutput {
            payload,
            headers: self.headers,
        });
        response
    }
}

/// Default exception filter: every error becomes an [`HttpException`] response.
#[derive(Default)]
pub struct HttpExceptionFilter;

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: ExceptionError) -> Response {
        HttpException::from_error(error).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_echoes_title_without_message() {
        let payload = HttpException::new(StatusCode::BAD_REQUEST).payload();
        assert_eq!(payload.status_code, 400);
        assert_eq!(payload.error, "Bad Request");
        assert_eq!(payload.message, "Bad Request");
    }

    #[test]
    fn test_server_errors_are_masked() {
        let payload = HttpException::internal("db exploded").payload();
        assert_eq!(payload.error, "Internal Server Error");
        assert_eq!(payload.message, MASKED_SERVER_MESSAGE);
    }

    #[test]
    fn test_payload_key_order() {
        let json = serde_json::to_string(&HttpException::bad_request("hi").payload()).unwrap();
        assert_eq!(json, r#"{"statusCode":400,"error":"Bad Request","message":"hi"}"#);
    }

    #[test]
    fn test_into_response_marks_error_output() {
        let response = HttpException::unauthorized("my-scheme").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "my-scheme");

        let output = response.extensions().get::<ErrorOutput>().unwrap();
        assert_eq!(output.payload.message, "Unauthorized");
        assert_eq!(output.headers.len(), 1);
        assert!(output.headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_error_output_for_bare_status() {
        let output = ErrorOutput::for_status(StatusCode::NOT_FOUND);
        assert_eq!(output.payload.status_code, 404);
        assert_eq!(output.payload.error, "Not Found");
        assert_eq!(output.payload.message, "Not Found");
        assert!(output.headers.is_empty());

        let output = ErrorOutput::for_status(StatusCode::BAD_GATEWAY);
        assert_eq!(output.payload.message, MASKED_SERVER_MESSAGE);
    }

    #[test]
    fn test_from_error_keeps_http_exception() {
        let boxed: ExceptionError = Box::new(HttpException::forbidden("nope"));
        assert_eq!(HttpException::from_error(boxed).status(), StatusCode::FORBIDDEN);

        let boxed: ExceptionError = "my gosh".into();
        let exception = HttpException::from_error(boxed);
        assert_eq!(exception.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(exception.to_string(), "500 Internal Server Error: my gosh");
    }
}
