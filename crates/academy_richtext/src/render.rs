//! HTML rendering of rich-text trees.
//!
//! # Node Mapping
//!
//! | Node | Output |
//! |------|--------|
//! | `Paragraph` | `<p>…</p>` |
//! | `Heading` H1/H2 | `<h1 id="…">…</h1>`, id from [`heading_id`] |
//! | `Heading` H3–H6 | `<h3>…</h3>` (no id) |
//! | `EmbeddedAsset` | `<div class="asset"><img …/><p class="asset-caption">…</p></div>` |
//! | `Hyperlink` | `<a href="…">…</a>` |
//! | lists, quote, rule, table | their plain HTML elements |
//! | `Document`, `Other` | children only |
//!
//! Text and attribute values are escaped; the output is a fragment with no
//! surrounding `<html>`.

use crate::heading::heading_text;
use crate::node::{Asset, Mark, Node, Text};
use crate::slug::heading_id;
use quick_xml::escape::escape;

/// Render a tree to an HTML fragment.
pub fn render_html(root: &Node) -> String {
    let mut out = String::new();
    render_node(root, &mut out);
    out
}

/// Append the HTML for one node (and its subtree) to `out`.
pub fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Document(children) | Node::Other { children, .. } => render_children(children, out),
        Node::Paragraph(children) => wrap("p", children, out),
        Node::Heading { level, children } if level.in_toc() => {
            let id = heading_id(&heading_text(children));
            out.push('<');
            out.push_str(level.tag());
            if !id.is_empty() {
                push_attr(out, "id", &id);
            }
            out.push('>');
            render_children(children, out);
            close(level.tag(), out);
        }
        Node::Heading { level, children } => wrap(level.tag(), children, out),
        Node::UnorderedList(children) => wrap("ul", children, out),
        Node::OrderedList(children) => wrap("ol", children, out),
        Node::ListItem(children) => wrap("li", children, out),
        Node::Blockquote(children) => wrap("blockquote", children, out),
        Node::Hr => out.push_str("<hr/>"),
        Node::Table(children) => {
            out.push_str("<table><tbody>");
            render_children(children, out);
            out.push_str("</tbody></table>");
        }
        Node::TableRow(children) => wrap("tr", children, out),
        Node::TableCell(children) => wrap("td", children, out),
        Node::TableHeaderCell(children) => wrap("th", children, out),
        Node::EmbeddedAsset(Some(asset)) => render_asset(asset, out),
        // Unresolved asset reference: nothing to show.
        Node::EmbeddedAsset(None) => {}
        Node::Hyperlink { uri, children } => {
            out.push_str("<a");
            push_attr(out, "href", uri);
            out.push('>');
            render_children(children, out);
            close("a", out);
        }
        Node::Text(text) => render_text(text, out),
    }
}

fn render_children(children: &[Node], out: &mut String) {
    for child in children {
        render_node(child, out);
    }
}

fn wrap(tag: &str, children: &[Node], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(children, out);
    close(tag, out);
}

fn close(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn render_asset(asset: &Asset, out: &mut String) {
    let title = asset.title.as_deref().unwrap_or_default();
    out.push_str("<div class=\"asset\"><img");
    push_attr(out, "src", &asset.url);
    push_attr(out, "alt", title);
    out.push_str("/>");
    if !title.is_empty() {
        out.push_str("<p class=\"asset-caption\">");
        out.push_str(&escape(title));
        out.push_str("</p>");
    }
    out.push_str("</div>");
}

/// Marks nest in the order they are listed, first mark outermost.
fn render_text(text: &Text, out: &mut String) {
    let tags: Vec<&str> = text.marks.iter().filter_map(mark_tag).collect();
    for tag in &tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    out.push_str(&escape(text.value.as_str()));
    for tag in tags.iter().rev() {
        close(tag, out);
    }
}

const fn mark_tag(mark: &Mark) -> Option<&'static str> {
    match mark {
        Mark::Bold => Some("b"),
        Mark::Italic => Some("i"),
        Mark::Underline => Some("u"),
        Mark::Code => Some("code"),
        Mark::Superscript => Some("sup"),
        Mark::Subscript => Some("sub"),
        Mark::Strikethrough => Some("s"),
        Mark::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::extract_headings;
    use crate::node::{Document, HeadingLevel};
    use serde_json::json;

    #[test]
    fn test_paragraph() {
        let node = Node::Paragraph(vec![Node::text("Hello")]);
        assert_eq!(render_html(&node), "<p>Hello</p>");
    }

    #[test]
    fn test_heading_ids() {
        let node = Node::Document(vec![
            Node::heading(HeadingLevel::H1, vec![Node::text("Hello World")]),
            Node::heading(HeadingLevel::H2, vec![Node::text("Sub Part")]),
            Node::heading(HeadingLevel::H3, vec![Node::text("Minor")]),
        ]);
        assert_eq!(
            render_html(&node),
            r#"<h1 id="hello-world">Hello World</h1><h2 id="sub-part">Sub Part</h2><h3>Minor</h3>"#
        );
    }

    #[test]
    fn test_empty_heading_has_no_id() {
        let node = Node::heading(HeadingLevel::H1, vec![]);
        assert_eq!(render_html(&node), "<h1></h1>");
    }

    #[test]
    fn test_inline_ids_match_toc() {
        let doc = Document::from_value(json!({
            "nodeType": "document",
            "content": [
                { "nodeType": "heading-1", "content": [{ "nodeType": "text", "value": "What is  a DAO?", "marks": [] }] },
                { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "x", "marks": [] }] },
                { "nodeType": "heading-2", "content": [
                    { "nodeType": "text", "value": "Voting ", "marks": [] },
                    { "nodeType": "hyperlink", "data": { "uri": "https://dao.example" }, "content": [
                        { "nodeType": "text", "value": "power", "marks": [] }
                    ]}
                ]}
            ]
        }))
        .unwrap();

        let html = render_html(doc.root());
        for heading in extract_headings(doc.root()) {
            assert!(
                html.contains(&format!("id=\"{}\"", escape(heading.id.as_str()))),
                "missing anchor for {}",
                heading.id
            );
        }
    }

    #[test]
    fn test_asset_with_caption() {
        let node = Node::EmbeddedAsset(Some(Asset {
            url: "//img.example/a.png".to_string(),
            title: Some("Chart".to_string()),
        }));
        assert_eq!(
            render_html(&node),
            r#"<div class="asset"><img src="//img.example/a.png" alt="Chart"/><p class="asset-caption">Chart</p></div>"#
        );
    }

    #[test]
    fn test_asset_without_caption() {
        let node = Node::EmbeddedAsset(Some(Asset {
            url: "/a.png".to_string(),
            title: None,
        }));
        assert_eq!(
            render_html(&node),
            r#"<div class="asset"><img src="/a.png" alt=""/></div>"#
        );
    }

    #[test]
    fn test_unresolved_asset_renders_nothing() {
        assert_eq!(render_html(&Node::EmbeddedAsset(None)), "");
    }

    #[test]
    fn test_hyperlink_escapes_uri() {
        let node = Node::hyperlink("https://x.test/?a=1&b=\"2\"", vec![Node::text("go")]);
        assert_eq!(
            render_html(&node),
            r#"<a href="https://x.test/?a=1&amp;b=&quot;2&quot;">go</a>"#
        );
    }

    #[test]
    fn test_text_escaped() {
        let node = Node::text("<script>alert(1)</script> & more");
        assert_eq!(
            render_html(&node),
            "&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"
        );
    }

    #[test]
    fn test_marks_nest_in_order() {
        let node = Node::Text(Text {
            value: "x".to_string(),
            marks: vec![Mark::Bold, Mark::Italic, Mark::Other("glow".to_string())],
        });
        assert_eq!(render_html(&node), "<b><i>x</i></b>");
    }

    #[test]
    fn test_lists_quote_rule() {
        let node = Node::Document(vec![
            Node::UnorderedList(vec![Node::ListItem(vec![Node::Paragraph(vec![
                Node::text("a"),
            ])])]),
            Node::OrderedList(vec![Node::ListItem(vec![Node::text("b")])]),
            Node::Blockquote(vec![Node::text("c")]),
            Node::Hr,
        ]);
        assert_eq!(
            render_html(&node),
            "<ul><li><p>a</p></li></ul><ol><li>b</li></ol><blockquote>c</blockquote><hr/>"
        );
    }

    #[test]
    fn test_table() {
        let node = Node::Table(vec![
            Node::TableRow(vec![Node::TableHeaderCell(vec![Node::text("k")])]),
            Node::TableRow(vec![Node::TableCell(vec![Node::text("v")])]),
        ]);
        assert_eq!(
            render_html(&node),
            "<table><tbody><tr><th>k</th></tr><tr><td>v</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_unknown_renders_children() {
        let node = Node::Other {
            node_type: "embedded-entry-inline".to_string(),
            children: vec![Node::text("inner")],
        };
        assert_eq!(render_html(&node), "inner");
    }
}
