//! Hierarchy naming: `Projects/Web/notes.md` -> `projects.web.notes.md`
//!
//! Folder nesting becomes dot-delimited name segments. Every function here is
//! pure: same input, same output, no I/O.

use dendronize_core::MARKDOWN_EXTENSION;
use regex::Regex;
use std::sync::LazyLock;

/// Path separators of either platform
static SEPARATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/\\]").unwrap());

/// Runs of whitespace
static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Anything outside the hierarchy identifier alphabet
static DISALLOWED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9.\-]").unwrap());

/// Normalize `input` into the identifier alphabet `[a-z0-9.-]`.
///
/// Lower-cases, turns separators into `.`, whitespace runs into
/// `whitespace_replacement`, then drops every remaining disallowed character.
pub(crate) fn normalize(input: &str, whitespace_replacement: &str) -> String {
    let lowered = input.to_lowercase();
    let dotted = SEPARATOR_PATTERN.replace_all(&lowered, ".");
    let joined = WHITESPACE_PATTERN.replace_all(&dotted, whitespace_replacement);
    DISALLOWED_PATTERN.replace_all(&joined, "").into_owned()
}

/// Map a slash-delimited relative path to its hierarchy identifier.
///
/// Whitespace becomes `-` so that `My Notes/Daily Log.md` reads
/// `my-notes.daily-log.md`. The extension is kept.
///
/// # Examples
///
/// ```
/// use dendronize_transform::path_to_hierarchy;
///
/// assert_eq!(path_to_hierarchy("Projects/Web/notes.md"), "projects.web.notes.md");
/// assert_eq!(path_to_hierarchy("My Notes/Daily Log.md"), "my-notes.daily-log.md");
/// ```
pub fn path_to_hierarchy(relative_path: &str) -> String {
    normalize(relative_path, "-")
}

/// Parent hierarchy of a note, or `None` for a note at the vault root.
///
/// The Markdown extension is removed before splitting, so the last segment
/// is the note's own name.
///
/// # Examples
///
/// ```
/// use dendronize_transform::extract_parent_hierarchy;
///
/// assert_eq!(
///     extract_parent_hierarchy("Projects/Web/notes.md").as_deref(),
///     Some("projects.web")
/// );
/// assert_eq!(extract_parent_hierarchy("readme.md"), None);
/// ```
pub fn extract_parent_hierarchy(relative_path: &str) -> Option<String> {
    let stem = strip_markdown_extension(relative_path);
    let hierarchy = path_to_hierarchy(stem);
    let segments: Vec<&str> = hierarchy.split('.').collect();

    if segments.len() < 2 {
        return None;
    }

    let parent = segments[..segments.len() - 1].join(".");
    if parent.is_empty() { None } else { Some(parent) }
}

fn strip_markdown_extension(relative_path: &str) -> &str {
    relative_path
        .strip_suffix(MARKDOWN_EXTENSION)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(relative_path)
}

/// Whether `identifier` only uses the hierarchy identifier alphabet
pub fn is_hierarchy_identifier(identifier: &str) -> bool {
    identifier
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
}
