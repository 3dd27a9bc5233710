/// Human-readable explanation of an error status code.
pub fn explain(status: u16) -> Option<&'static str> {
    let text = match status {
        400 => "Sorry, your request was invalid. Please try another way.",
        401 => "Please log in to view that page.",
        402 => "Please pay to view that page.",
        403 => "You are not allowed to view that page.",
        404 => "Sorry, we cannot find that page.",
        406 => "Sorry, your software cannot open that page. Please try another app.",
        408 => "Sorry, the request took too long. Please try again.",
        410 => "That page has been deleted.",
        413 => "Sorry, the data you sent is too big. Please try another way.",
        414 => "Sorry, that URL is too long. Please try another way.",
        415 => "Sorry, the data you sent is unsupported. Please try another format.",
        429 => "You are overwhelming us with traffic. Please try again later.",
        500 => "Sorry, an internal problem has arisen. Please try again.",
        501 => "Sorry, we don't know how to respond to your request.",
        502 => "Sorry, we had trouble with an upstream service. Please try again.",
        503 => "Sorry, we are down temporarily. Please try again soon.",
        504 => "Sorry, an upstream service took too long to respond. Please try again.",
        505 => "Sorry, your software is unsupported. Please try another app.",
        511 => "Please log in to use the network.",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODES: [u16; 19] = [
        400, 401, 402, 403, 404, 406, 408, 410, 413, 414, 415, 429, 500, 501, 502, 503, 504, 505,
        511,
    ];

    #[test]
    fn test_every_explanation_is_a_sentence() {
        for code in CODES {
            let text = explain(code).unwrap();
            assert!(text.starts_with(|c: char| c.is_uppercase()), "{code}: {text}");
            assert!(text.ends_with('.'), "{code}: {text}");
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0, 200, 302, 405, 418, 599, 1000] {
            assert_eq!(explain(code), None);
        }
    }

    #[test]
    fn test_bad_request_text() {
        assert_eq!(
            explain(400),
            Some("Sorry, your request was invalid. Please try another way.")
        );
    }
}
