//! Anchor ids for headings.
//!
//! Both the table of contents and the inline `<h1 id>` / `<h2 id>` anchors
//! call [`heading_id`], so a link `#id` always resolves to its heading.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of whitespace, collapsed to one hyphen.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Derive the anchor id for a heading text.
///
/// Whitespace runs become a single `-` and the result is lower-cased.
/// Nothing else is touched: punctuation stays, leading or trailing
/// whitespace becomes a leading or trailing hyphen, and equal texts give
/// equal ids.
///
/// | Text | Id |
/// |------|----|
/// | `Hello World` | `hello-world` |
/// | `What is  DeFi?` | `what-is-defi?` |
/// | ` Padded ` | `-padded-` |
pub fn heading_id(text: &str) -> String {
    WHITESPACE.replace_all(text, "-").to_lowercase()
}
