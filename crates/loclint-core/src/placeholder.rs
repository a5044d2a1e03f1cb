//! Placeholder token extraction.
//!
//! A placeholder is a delimited substring of a row's value standing in for a
//! runtime substitution, e.g. `{name}` in `"Hello {name}!"`. Tokens keep
//! their delimiters so languages can be compared byte-for-byte.

/// Opening delimiter of a placeholder token.
pub const PLACEHOLDER_START: &str = "{";

/// Closing delimiter of a placeholder token.
pub const PLACEHOLDER_STOP: &str = "}";

/// Outcome of scanning one text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScan {
    /// Tokens in order of appearance, delimiters retained, duplicates kept.
    /// Deduplication, where wanted, is the consumer's business.
    pub tokens: Vec<String>,
    /// A start delimiter had no matching stop delimiter. Scanning stops at
    /// the offending start; tokens collected before it are still returned.
    pub unterminated: bool,
}

/// Scan `text` left to right and collect every delimited token.
///
/// Single pass: find the next start delimiter, then the next stop delimiter
/// after it, emit the substring spanning both inclusive, continue after the
/// stop. A start with no stop sets [`TokenScan::unterminated`] and ends the
/// scan immediately.
pub fn scan_placeholders(text: &str) -> TokenScan {
    let mut scan = TokenScan::default();
    let mut rest = text;
    while let Some(start) = rest.find(PLACEHOLDER_START) {
        let body = &rest[start + PLACEHOLDER_START.len()..];
        let Some(stop) = body.find(PLACEHOLDER_STOP) else {
            scan.unterminated = true;
            return scan;
        };
        let end = start + PLACEHOLDER_START.len() + stop + PLACEHOLDER_STOP.len();
        scan.tokens.push(rest[start..end].to_string());
        rest = &rest[end..];
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        let scan = scan_placeholders(text);
        assert!(!scan.unterminated, "unexpected unterminated flag for {text:?}");
        scan.tokens
    }

    #[test]
    fn plain_text_has_no_tokens() {
        assert!(tokens("Hello world").is_empty());
        assert!(tokens("").is_empty());
    }

    #[test]
    fn single_token_keeps_delimiters() {
        assert_eq!(tokens("Hello {name}!"), vec!["{name}"]);
    }

    #[test]
    fn tokens_come_back_in_text_order() {
        assert_eq!(
            tokens("{greeting}, {name}! You have {count} messages"),
            vec!["{greeting}", "{name}", "{count}"]
        );
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(tokens("{x} and {x} again"), vec!["{x}", "{x}"]);
    }

    #[test]
    fn empty_token_is_a_token() {
        assert_eq!(tokens("oops {}"), vec!["{}"]);
    }

    #[test]
    fn stray_stop_delimiter_is_plain_text() {
        assert_eq!(tokens("a} {b}"), vec!["{b}"]);
    }

    #[test]
    fn nested_start_is_swallowed_by_the_outer_token() {
        // The next stop after the first start closes the token.
        assert_eq!(tokens("{a{b}"), vec!["{a{b}"]);
    }

    #[test]
    fn unterminated_start_flags_and_stops() {
        let scan = scan_placeholders("Hola {name");
        assert!(scan.unterminated);
        assert!(scan.tokens.is_empty());
    }

    #[test]
    fn tokens_before_the_malformation_are_kept() {
        let scan = scan_placeholders("{a} then {b");
        assert!(scan.unterminated);
        assert_eq!(scan.tokens, vec!["{a}"]);
    }

    #[test]
    fn stop_before_an_unterminated_start_does_not_close_it() {
        let scan = scan_placeholders("x} tail {open");
        assert!(scan.unterminated);
        assert!(scan.tokens.is_empty());
    }
}
