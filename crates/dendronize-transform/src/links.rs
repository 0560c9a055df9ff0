//! Wikilink rewriting: `[[Other Page]]` -> `[[other.page]]`
//!
//! Link targets name hierarchy nodes directly, so whitespace inside a link
//! maps to `.` (a new hierarchy level) where a storage path maps it to `-`.

use crate::naming::normalize;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Matches [[...]] with a non-empty interior free of `]`
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Map a wikilink target to its hierarchy identifier.
///
/// # Examples
///
/// ```
/// use dendronize_transform::link_to_hierarchy;
///
/// assert_eq!(link_to_hierarchy(" Other Page "), "other.page");
/// assert_eq!(link_to_hierarchy("Projects/Web Dev"), "projects.web.dev");
/// ```
pub fn link_to_hierarchy(target: &str) -> String {
    normalize(target.trim(), ".")
}

/// Rewrite every `[[...]]` span of `text`.
///
/// With `convert_hierarchy` the interior becomes its hierarchy identifier;
/// without it the interior is only trimmed. Bracket sequences that do not
/// form a complete `[[...]]` span are left untouched.
///
/// # Examples
///
/// ```
/// use dendronize_transform::rewrite_links;
///
/// assert_eq!(rewrite_links("See [[Other Page]].", true), "See [[other.page]].");
/// assert_eq!(rewrite_links("See [[ Other Page ]].", false), "See [[Other Page]].");
/// ```
pub fn rewrite_links(text: &str, convert_hierarchy: bool) -> String {
    if !text.contains("[[") {
        return text.to_string();
    }

    WIKILINK_PATTERN
        .replace_all(text, |caps: &Captures| {
            let interior = &caps[1];
            let target = if convert_hierarchy {
                link_to_hierarchy(interior)
            } else {
                interior.trim().to_string()
            };
            format!("[[{}]]", target)
        })
        .into_owned()
}

/// Interiors of all `[[...]]` spans, in document order
pub fn wikilink_targets(text: &str) -> Vec<&str> {
    WIKILINK_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
