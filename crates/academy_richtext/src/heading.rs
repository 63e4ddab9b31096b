//! Table-of-contents extraction.

use crate::node::{HeadingLevel, Node};
use crate::slug::heading_id;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Anchor id, see [`heading_id`].
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

/// Flattened text of a heading: the values of its direct text children,
/// concatenated. Links, marks-only wrappers and other non-text children
/// contribute nothing.
pub fn heading_text(children: &[Node]) -> String {
    children.iter().filter_map(Node::text_value).collect()
}

/// Collect the `heading-1` / `heading-2` nodes of a tree in document order.
///
/// The walk is depth-first pre-order over every descendant, including the
/// root itself. A heading without text (no children, or only non-text
/// children) yields no entry, matching the renderer, which gives it no id. Headings with
/// equal text get equal ids; nothing is de-duplicated.
pub fn extract_headings(root: &Node) -> Vec<Heading> {
    let mut headings = Vec::new();
    visit(root, &mut headings);
    headings
}

fn visit(node: &Node, headings: &mut Vec<Heading>) {
    if let Node::Heading { level, children } = node
        && level.in_toc()
    {
        let text = heading_text(children);
        if !text.is_empty() {
            headings.push(Heading {
                id: heading_id(&text),
                text,
                level: *level,
            });
        }
    }

    for child in node.children() {
        visit(child, headings);
    }
}
