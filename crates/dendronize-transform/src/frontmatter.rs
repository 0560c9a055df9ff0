//! Leading metadata block handling: `---\nYAML\n---`
//!
//! Only a block at the very start of the document is recognized. Delimiter
//! lines must be exactly `---` (CRLF tolerated).

use regex::Regex;
use std::sync::LazyLock;

/// Matches a leading metadata block, delimiters inclusive. The body group is
/// lazy-optional so an empty block `---\n---\n` is the shortest match.
static METADATA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(?:(.*?)\r?\n)??---(?:\r?\n|\z)").unwrap());

/// Split `text` into its leading metadata body (without delimiters) and the rest
pub fn split_metadata(text: &str) -> (Option<&str>, &str) {
    match METADATA_PATTERN.captures(text) {
        Some(caps) => {
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let body = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            (Some(body), &text[end..])
        }
        None => (None, text),
    }
}

/// Remove the leading metadata block, if any.
///
/// Stacked leading blocks are removed together, which keeps the operation
/// idempotent.
///
/// # Examples
///
/// ```
/// use dendronize_transform::strip_metadata;
///
/// assert_eq!(strip_metadata("---\ntitle: X\n---\nBody"), "Body");
/// assert_eq!(strip_metadata("Body\n---\nnot: metadata\n---\n"), "Body\n---\nnot: metadata\n---\n");
/// ```
pub fn strip_metadata(text: &str) -> String {
    let mut rest = text;
    while let (Some(_), remainder) = split_metadata(rest) {
        rest = remainder;
    }
    if rest.len() != text.len() {
        log::trace!("Stripped {} bytes of metadata", text.len() - rest.len());
    }
    rest.to_string()
}

/// Whether `text` starts with a metadata block
pub fn has_metadata(text: &str) -> bool {
    METADATA_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_block() {
        let text = "---\ntitle: X\n---\nSee [[Other Page]].";
        assert_eq!(strip_metadata(text), "See [[Other Page]].");
    }

    #[test]
    fn test_multiline_block() {
        let text = "---\ntitle: Test\ntags:\n  - rust\n  - notes\n---\n# Heading\n";
        assert_eq!(strip_metadata(text), "# Heading\n");
        let (body, rest) = split_metadata(text);
        assert_eq!(body, Some("title: Test\ntags:\n  - rust\n  - notes"));
        assert_eq!(rest, "# Heading\n");
    }

    #[test]
    fn test_no_block() {
        let text = "Just content\nNo metadata";
        assert_eq!(strip_metadata(text), text);
        assert!(!has_metadata(text));
    }

    #[test]
    fn test_block_not_at_start_untouched() {
        let text = "\n---\ntitle: X\n---\nBody";
        assert_eq!(strip_metadata(text), text);
    }

    #[test]
    fn test_unclosed_block_untouched() {
        let text = "---\ntitle: Test\nNo closing";
        assert_eq!(strip_metadata(text), text);
    }

    #[test]
    fn test_closing_delimiter_must_be_exact() {
        let text = "---\ntitle: X\n----\nBody";
        assert_eq!(strip_metadata(text), text);
        let text = "---\ntitle: X\n--- \nBody";
        assert_eq!(strip_metadata(text), text);
    }

    #[test]
    fn test_block_at_end_of_input() {
        assert_eq!(strip_metadata("---\ntitle: X\n---"), "");
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(strip_metadata("---\n---\nBody"), "Body");
        assert_eq!(split_metadata("---\n---\nBody").0, Some(""));
    }

    #[test]
    fn test_crlf_block() {
        assert_eq!(strip_metadata("---\r\ntitle: X\r\n---\r\nBody"), "Body");
    }

    #[test]
    fn test_shortest_block_wins() {
        let text = "---\na: 1\n---\nBody\n---\nmore\n";
        assert_eq!(strip_metadata(text), "Body\n---\nmore\n");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "---\na: 1\n---\nBody",
            "---\na: 1\n---\n---\nb: 2\n---\nBody",
            "No metadata",
            "---\nunclosed",
            "",
        ];
        for input in inputs {
            let once = strip_metadata(input);
            assert_eq!(strip_metadata(&once), once, "input {:?}", input);
        }
    }
}
