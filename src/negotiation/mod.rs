//! Content negotiation
//!
//! Decides from a request's `Accept` header whether the client would rather
//! receive an HTML page than a structured (JSON) payload.

mod media_type;

pub use media_type::{MediaRange, media_types, parse_accept};

use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// How the ranked `Accept` entries are matched against HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NegotiationPolicy {
    /// Only the most preferred media type counts; it must be `text/html`
    /// or `text/*`. `*/*` alone does not select HTML.
    #[default]
    StrictFirstMatch,
    /// Any entry equal to `text/html` or `*/*` selects HTML, regardless of
    /// its rank. `application/json;q=0.9,*/*` therefore selects HTML.
    AnyMatch,
}

/// Returns `true` when the client prefers HTML under `policy`.
///
/// A missing or blank header never selects HTML.
pub fn prefers_html(accept: Option<&str>, policy: NegotiationPolicy) -> bool {
    let Some(accept) = accept.map(str::trim).filter(|value| !value.is_empty()) else {
        return false;
    };

    let ranked = media_types(accept);
    match policy {
        NegotiationPolicy::StrictFirstMatch => ranked
            .first()
            .is_some_and(|top| matches!(top.as_str(), "text/html" | "text/*")),
        NegotiationPolicy::AnyMatch => ranked
            .iter()
            .any(|media| matches!(media.as_str(), "text/html" | "*/*")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const STRICT: NegotiationPolicy = NegotiationPolicy::StrictFirstMatch;
    const ANY: NegotiationPolicy = NegotiationPolicy::AnyMatch;

    #[test]
    fn test_missing_or_empty_header() {
        for policy in [STRICT, ANY] {
            assert!(!prefers_html(None, policy));
            assert!(!prefers_html(Some(""), policy));
            assert!(!prefers_html(Some("   "), policy));
        }
    }

    #[test]
    fn test_strict_first_match() {
        assert!(prefers_html(Some("text/html"), STRICT));
        assert!(prefers_html(Some("text/*"), STRICT));
        assert!(prefers_html(Some("text/html, application/json"), STRICT));
        assert!(!prefers_html(Some("*/*"), STRICT));
        assert!(!prefers_html(Some("application/json"), STRICT));
        assert!(!prefers_html(Some("text/html;q=0.9, application/json"), STRICT));
        assert!(!prefers_html(Some("application/json;q=0.9,*/*"), STRICT));
    }

    #[test]
    fn test_any_match() {
        assert!(prefers_html(Some("text/html"), ANY));
        assert!(prefers_html(Some("*/*"), ANY));
        assert!(prefers_html(Some("text/html;q=0.9, application/json"), ANY));
        assert!(prefers_html(Some("application/json;q=0.9,*/*"), ANY));
        assert!(!prefers_html(Some("text/*"), ANY));
        assert!(!prefers_html(Some("application/json"), ANY));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(STRICT.to_string(), "strict-first-match");
        assert_eq!(NegotiationPolicy::from_str("any-match").unwrap(), ANY);
        assert!(NegotiationPolicy::from_str("loose").is_err());
    }
}
