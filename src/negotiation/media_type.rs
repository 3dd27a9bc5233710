use mime::{Mime, MimeIter};
use std::cmp::Ordering;

/// One entry of an `Accept` header, e.g. `text/html;level=1;q=0.8`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub mime: Mime,
    pub quality: f32,
}

impl MediaRange {
    /// Wrap a parsed entry. Returns `None` for ranges that can't occur in
    /// `Accept` (`*/json`, empty subtype) or carry an invalid `q`.
    pub fn new(mime: Mime) -> Option<Self> {
        if mime.subtype().as_str().is_empty()
            || (mime.type_() == "*" && mime.subtype() != "*")
        {
            return None;
        }
        let quality = match mime.get_param("q") {
            Some(q) => parse_quality(q.as_str())?,
            None => 1.0,
        };
        Some(Self { mime, quality })
    }

    /// `type/subtype` without parameters, lowercased.
    pub fn essence(&self) -> String {
        self.mime.essence_str().to_ascii_lowercase()
    }

    /// Media type parameters, `q` excluded.
    pub fn param_count(&self) -> usize {
        self.mime.params().filter(|(name, _)| *name != "q").count()
    }

    fn specificity(&self) -> u8 {
        if self.mime.type_() == "*" {
            0
        } else if self.mime.subtype() == "*" {
            1
        } else if self.param_count() == 0 {
            2
        } else {
            3
        }
    }

    fn preference(&self, other: &Self) -> Ordering {
        other
            .quality
            .total_cmp(&self.quality)
            .then_with(|| other.specificity().cmp(&self.specificity()))
    }
}

/// Media ranges of an `Accept` header, most preferred first.
///
/// Entries are ordered by quality, then by specificity, then by their
/// position in the header. Malformed entries and `q=0` entries are dropped.
pub fn parse_accept(header: &str) -> Vec<MediaRange> {
    let mut ranges: Vec<MediaRange> = MimeIter::new(header)
        .filter_map(Result::ok)
        .filter_map(MediaRange::new)
        .filter(|range| range.quality > 0.0)
        .collect();
    // sort_by is stable, so header order breaks the remaining ties
    ranges.sort_by(MediaRange::preference);
    ranges
}

/// Ranked media types (`type/subtype`, lowercased) of an `Accept` header.
pub fn media_types(header: &str) -> Vec<String> {
    parse_accept(header)
        .iter()
        .map(MediaRange::essence)
        .collect()
}

fn parse_quality(value: &str) -> Option<f32> {
    let quality: f32 = value.parse().ok()?;
    (0.0..=1.0).contains(&quality).then_some(quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(raw: &str) -> Option<MediaRange> {
        raw.parse::<Mime>().ok().and_then(MediaRange::new)
    }

    #[test]
    fn test_media_range_with_params() {
        let range = range("Text/HTML;level=1; q=0.5").unwrap();
        assert_eq!(range.essence(), "text/html");
        assert_eq!(range.param_count(), 1);
        assert_eq!(range.quality, 0.5);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(range("html").is_none());
        assert!(range("text/").is_none());
        assert!(range("*/json").is_none());
        assert!(range("text/html;q=abc").is_none());
        assert!(range("text/html;q=2").is_none());
    }

    #[test]
    fn test_orders_by_quality() {
        assert_eq!(
            media_types("text/html;q=0.9, application/json"),
            vec!["application/json", "text/html"]
        );
    }

    #[test]
    fn test_orders_by_specificity_on_equal_quality() {
        assert_eq!(
            media_types("*/*, text/*, text/plain, text/plain;format=flowed"),
            vec!["text/plain", "text/plain", "text/*", "*/*"]
        );
        let ranked = parse_accept("*/*, text/plain, text/plain;format=flowed");
        assert_eq!(ranked[0].param_count(), 1);
    }

    #[test]
    fn test_keeps_header_order_on_ties() {
        assert_eq!(
            media_types("application/json, text/html"),
            vec!["application/json", "text/html"]
        );
    }

    #[test]
    fn test_quoted_params_may_contain_commas() {
        let ranked = parse_accept(r#"application/json;q=0.5, text/html;foo="a,b""#);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].essence(), "text/html");
        assert_eq!(ranked[0].mime.get_param("foo").unwrap(), "a,b");
        assert_eq!(ranked[1].essence(), "application/json");
    }

    #[test]
    fn test_drops_refused_and_invalid_entries() {
        assert_eq!(
            media_types("text/html;q=0, bogus, , application/json"),
            vec!["application/json"]
        );
        assert!(media_types("").is_empty());
    }
}
