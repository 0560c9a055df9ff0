//! # Dendronize Transform
//!
//! Pure functions converting Obsidian naming and note content to Dendron
//! conventions. Nothing in this crate touches the file system.
//!
//! - [`naming`] - storage paths to dot-delimited hierarchy identifiers
//! - [`links`] - `[[wikilink]]` rewriting into the same identifier space
//! - [`frontmatter`] - leading `---` metadata block detection and removal
//!
//! ## Quick Start
//!
//! ```
//! use dendronize_core::TransformOptions;
//! use dendronize_transform::{path_to_hierarchy, transform_note};
//!
//! let options = TransformOptions::new().preserve_metadata(false);
//! let note = "---\ntitle: X\n---\nSee [[Other Page]].";
//!
//! assert_eq!(path_to_hierarchy("Projects/Web/notes.md"), "projects.web.notes.md");
//! assert_eq!(transform_note(note, &options), "See [[other.page]].");
//! ```

pub mod frontmatter;
pub mod links;
pub mod naming;

pub use frontmatter::{has_metadata, split_metadata, strip_metadata};
pub use links::{link_to_hierarchy, rewrite_links, wikilink_targets};
pub use naming::{extract_parent_hierarchy, is_hierarchy_identifier, path_to_hierarchy};

use dendronize_core::TransformOptions;

/// Apply the content transforms selected by `options` to one note.
///
/// Links are rewritten first, then the metadata block is stripped, so links
/// inside a preserved block are rewritten as well.
pub fn transform_note(text: &str, options: &TransformOptions) -> String {
    let mut content = if options.convert_wiki_links {
        rewrite_links(text, options.convert_hierarchy)
    } else {
        text.to_string()
    };

    if !options.preserve_metadata {
        content = strip_metadata(&content);
    }

    content
}

/// Target file name of a note: its hierarchy identifier, or its own name
/// when hierarchy conversion is off
pub fn target_file_name(relative_path: &str, name: &str, options: &TransformOptions) -> String {
    if options.convert_hierarchy {
        path_to_hierarchy(relative_path)
    } else {
        name.to_string()
    }
}
