use super::explanation::explain;
use crate::auth::Authentication;
use crate::exception::ErrorPayload;
use serde::Serialize;

pub const UNKNOWN_TITLE: &str = "Unknown Error";
pub const UNKNOWN_MESSAGE: &str = "Sorry, an unknown problem has arisen.";

/// Data handed to the error template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub code: u16,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_authenticated: Option<bool>,
}

impl RenderContext {
    pub fn new(payload: &ErrorPayload, auth: Option<Authentication>) -> Self {
        let title = if payload.error.is_empty() {
            UNKNOWN_TITLE.to_string()
        } else {
            payload.error.clone()
        };

        Self {
            code: payload.status_code,
            title,
            message: to_sentence(resolve_message(payload)),
            is_authenticated: auth.map(|auth| auth.is_authenticated),
        }
    }
}

/// Custom message, then the status explanation, then whatever the payload
/// carries, then a generic fallback.
fn resolve_message(payload: &ErrorPayload) -> &str {
    let custom = Some(payload.message.as_str())
        .filter(|message| !message.is_empty() && *message != payload.error);

    custom
        .or_else(|| explain(payload.status_code))
        .or_else(|| Some(payload.message.as_str()).filter(|m| !m.is_empty()))
        .or_else(|| Some(payload.error.as_str()).filter(|e| !e.is_empty()))
        .unwrap_or(UNKNOWN_MESSAGE)
}

/// Capitalise the first letter and end with a single period.
pub fn to_sentence(text: &str) -> String {
    let mut chars = text.chars();
    let mut sentence = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !sentence.ends_with('.') {
        sentence.push('.');
    }
    sentence
}
