//! Typed rich-text document tree.
//!
//! The upstream JSON tags every node with a `nodeType` string. Here the tag
//! is resolved once, at deserialization time, into the closed [`Node`] enum,
//! so every consumer matches on variants instead of comparing strings.
//!
//! ```text
//! { "nodeType": "document", "content": [            Node::Document([
//!   { "nodeType": "heading-1", "content": [   ─►      Node::Heading { level: H1, children: [
//!     { "nodeType": "text", "value": "Hi" }             Node::Text(Text { value: "Hi", .. })
//!   ] }                                               ] }
//! ] }                                               ])
//! ```
//!
//! Tags this crate does not know about are kept as [`Node::Other`] with
//! their children, and render as a plain sequence of those children.

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while decoding a document payload.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed rich-text document")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Public Types
// ============================================================================

/// Root of a rich-text tree.
///
/// The root is an ordinary [`Node`]; it is usually `Node::Document` but any
/// node is accepted, so a bare heading or paragraph is a valid document too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Document(Node);

impl Document {
    /// Parse a document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a document from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    pub const fn root(&self) -> &Node {
        &self.0
    }
}

impl From<Node> for Document {
    fn from(root: Node) -> Self {
        Self(root)
    }
}

/// Heading depth, `heading-1` through `heading-6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
            Self::H6 => 6,
        }
    }

    /// HTML tag name for this level.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    /// Only the two top levels take part in the table of contents.
    pub const fn in_toc(self) -> bool {
        matches!(self, Self::H1 | Self::H2)
    }

    fn from_node_type(node_type: &str) -> Option<Self> {
        Some(match node_type {
            "heading-1" => Self::H1,
            "heading-2" => Self::H2,
            "heading-3" => Self::H3,
            "heading-4" => Self::H4,
            "heading-5" => Self::H5,
            "heading-6" => Self::H6,
            _ => return None,
        })
    }
}

/// Inline formatting applied to a text leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    Strikethrough,
    Other(String),
}

impl Mark {
    fn from_type(mark_type: String) -> Self {
        match mark_type.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "code" => Self::Code,
            "superscript" => Self::Superscript,
            "subscript" => Self::Subscript,
            "strikethrough" => Self::Strikethrough,
            _ => Self::Other(mark_type),
        }
    }
}

/// Text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub value: String,
    pub marks: Vec<Mark>,
}

impl Text {
    /// Unmarked text renders as a bare string; marked text gets wrapped.
    pub fn is_plain(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Image referenced by an `embedded-asset-block` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    pub title: Option<String>,
}

/// One element of a rich-text tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    Document(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },
    UnorderedList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    Blockquote(Vec<Node>),
    Hr,
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    TableCell(Vec<Node>),
    TableHeaderCell(Vec<Node>),
    /// `None` when the payload lacks a usable file reference.
    EmbeddedAsset(Option<Asset>),
    Hyperlink {
        uri: String,
        children: Vec<Node>,
    },
    Text(Text),
    Other {
        node_type: String,
        children: Vec<Node>,
    },
}

impl Node {
    /// Plain text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Text {
            value: value.into(),
            marks: Vec::new(),
        })
    }

    pub fn heading(level: HeadingLevel, children: Vec<Node>) -> Self {
        Self::Heading { level, children }
    }

    pub fn hyperlink(uri: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Hyperlink {
            uri: uri.into(),
            children,
        }
    }

    /// Ordered children of this node; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Document(children)
            | Self::Paragraph(children)
            | Self::UnorderedList(children)
            | Self::OrderedList(children)
            | Self::ListItem(children)
            | Self::Blockquote(children)
            | Self::Table(children)
            | Self::TableRow(children)
            | Self::TableCell(children)
            | Self::TableHeaderCell(children)
            | Self::Heading { children, .. }
            | Self::Hyperlink { children, .. }
            | Self::Other { children, .. } => children,
            Self::Hr | Self::EmbeddedAsset(_) | Self::Text(_) => &[],
        }
    }

    /// Value of a text leaf, `None` for every other variant.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&text.value),
            _ => None,
        }
    }
}

// ============================================================================
// Wire Format
// ============================================================================

/// Loose mirror of the upstream JSON. Every field is optional so that a
/// partially malformed node still decodes and falls back to `Node::Other`.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawNode {
    node_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    content: Vec<RawNode>,
    #[serde(deserialize_with = "null_as_default")]
    data: RawData,
    value: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    marks: Vec<RawMark>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawData {
    uri: Option<String>,
    target: Option<RawTarget>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTarget {
    fields: Option<RawAssetFields>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawAssetFields {
    file: Option<RawFile>,
    title: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawFile {
    url: Option<String>,
}

#[derive(Deserialize)]
struct RawMark {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    mark_type: String,
}

/// An explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            node_type,
            content,
            data,
            value,
            marks,
        } = raw;
        let children = || content.into_iter().map(Node::from).collect::<Vec<_>>();

        // A leaf carrying a value but no tag is treated as text.
        let Some(node_type) = node_type else {
            return match value {
                Some(value) => Self::Text(Text {
                    value,
                    marks: marks.into_iter().map(|m| Mark::from_type(m.mark_type)).collect(),
                }),
                None => Self::Other {
                    node_type: String::new(),
                    children: children(),
                },
            };
        };

        if let Some(level) = HeadingLevel::from_node_type(&node_type) {
            return Self::Heading {
                level,
                children: children(),
            };
        }

        match node_type.as_str() {
            "document" => Self::Document(children()),
            "paragraph" => Self::Paragraph(children()),
            "unordered-list" => Self::UnorderedList(children()),
            "ordered-list" => Self::OrderedList(children()),
            "list-item" => Self::ListItem(children()),
            "blockquote" => Self::Blockquote(children()),
            "hr" => Self::Hr,
            "table" => Self::Table(children()),
            "table-row" => Self::TableRow(children()),
            "table-cell" => Self::TableCell(children()),
            "table-header-cell" => Self::TableHeaderCell(children()),
            "embedded-asset-block" => Self::EmbeddedAsset(asset_from(data)),
            "text" => Self::Text(Text {
                value: value.unwrap_or_default(),
                marks: marks.into_iter().map(|m| Mark::from_type(m.mark_type)).collect(),
            }),
            "hyperlink" => match data.uri {
                Some(uri) => Self::Hyperlink {
                    uri,
                    children: children(),
                },
                None => Self::Other {
                    node_type,
                    children: children(),
                },
            },
            _ => Self::Other {
                node_type,
                children: children(),
            },
        }
    }
}

fn asset_from(data: RawData) -> Option<Asset> {
    let fields = data.target?.fields?;
    let url = fields.file?.url?;
    Some(Asset {
        url,
        title: fields.title.filter(|t| !t.is_empty()),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Node {
        Document::from_value(value).unwrap().root().clone()
    }

    #[test]
    fn test_parse_document_with_heading_and_paragraph() {
        let node = parse(json!({
            "nodeType": "document",
            "data": {},
            "content": [
                { "nodeType": "heading-1", "data": {}, "content": [
                    { "nodeType": "text", "value": "Intro", "marks": [], "data": {} }
                ]},
                { "nodeType": "paragraph", "data": {}, "content": [
                    { "nodeType": "text", "value": "Body", "marks": [{ "type": "bold" }], "data": {} }
                ]}
            ]
        }));

        let Node::Document(children) = node else {
            panic!("expected document root");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0],
            Node::heading(HeadingLevel::H1, vec![Node::text("Intro")])
        );
        assert_eq!(
            children[1],
            Node::Paragraph(vec![Node::Text(Text {
                value: "Body".to_string(),
                marks: vec![Mark::Bold],
            })])
        );
    }

    #[test]
    fn test_untagged_value_is_text() {
        let node = parse(json!({
            "nodeType": "heading-1",
            "content": [{ "value": "Hello World" }]
        }));
        assert_eq!(
            node,
            Node::heading(HeadingLevel::H1, vec![Node::text("Hello World")])
        );
    }

    #[test]
    fn test_embedded_asset() {
        let node = parse(json!({
            "nodeType": "embedded-asset-block",
            "content": [],
            "data": { "target": { "fields": {
                "title": "Diagram",
                "file": { "url": "//images.example.com/d.png" }
            }}}
        }));
        assert_eq!(
            node,
            Node::EmbeddedAsset(Some(Asset {
                url: "//images.example.com/d.png".to_string(),
                title: Some("Diagram".to_string()),
            }))
        );
    }

    #[test]
    fn test_embedded_asset_without_file() {
        let node = parse(json!({
            "nodeType": "embedded-asset-block",
            "data": { "target": { "sys": { "id": "abc", "linkType": "Asset" } } }
        }));
        assert_eq!(node, Node::EmbeddedAsset(None));
    }

    #[test]
    fn test_empty_asset_title_is_none() {
        let node = parse(json!({
            "nodeType": "embedded-asset-block",
            "data": { "target": { "fields": { "title": "", "file": { "url": "/a.png" } } } }
        }));
        assert_eq!(
            node,
            Node::EmbeddedAsset(Some(Asset {
                url: "/a.png".to_string(),
                title: None,
            }))
        );
    }

    #[test]
    fn test_hyperlink() {
        let node = parse(json!({
            "nodeType": "hyperlink",
            "data": { "uri": "https://example.com" },
            "content": [{ "nodeType": "text", "value": "site", "marks": [] }]
        }));
        assert_eq!(
            node,
            Node::hyperlink("https://example.com", vec![Node::text("site")])
        );
    }

    #[test]
    fn test_hyperlink_without_uri_falls_back() {
        let node = parse(json!({
            "nodeType": "hyperlink",
            "data": {},
            "content": [{ "nodeType": "text", "value": "dangling" }]
        }));
        assert_eq!(
            node,
            Node::Other {
                node_type: "hyperlink".to_string(),
                children: vec![Node::text("dangling")],
            }
        );
    }

    #[test]
    fn test_unknown_node_type_kept() {
        let node = parse(json!({
            "nodeType": "embedded-entry-block",
            "data": { "target": { "sys": { "id": "x" } } },
            "content": []
        }));
        assert_eq!(
            node,
            Node::Other {
                node_type: "embedded-entry-block".to_string(),
                children: vec![],
            }
        );
    }

    #[test]
    fn test_unknown_mark_kept() {
        let node = parse(json!({
            "nodeType": "text",
            "value": "x",
            "marks": [{ "type": "italic" }, { "type": "highlight" }]
        }));
        assert_eq!(
            node,
            Node::Text(Text {
                value: "x".to_string(),
                marks: vec![Mark::Italic, Mark::Other("highlight".to_string())],
            })
        );
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let node = parse(json!({
            "nodeType": "document",
            "data": null,
            "content": [
                { "nodeType": "paragraph", "data": null, "content": null },
                { "nodeType": "text", "value": "x", "marks": null },
                { "nodeType": "text", "value": "y", "marks": [{ "type": null }] }
            ]
        }));
        assert_eq!(
            node,
            Node::Document(vec![
                Node::Paragraph(vec![]),
                Node::text("x"),
                Node::Text(Text {
                    value: "y".to_string(),
                    marks: vec![Mark::Other(String::new())],
                }),
            ])
        );
    }

    #[test]
    fn test_all_heading_levels() {
        for (tag, level) in [
            ("heading-1", HeadingLevel::H1),
            ("heading-2", HeadingLevel::H2),
            ("heading-3", HeadingLevel::H3),
            ("heading-4", HeadingLevel::H4),
            ("heading-5", HeadingLevel::H5),
            ("heading-6", HeadingLevel::H6),
        ] {
            let node = parse(json!({ "nodeType": tag, "content": [] }));
            assert_eq!(node, Node::heading(level, vec![]));
        }
    }

    #[test]
    fn test_children_of_leaves_are_empty() {
        assert!(Node::Hr.children().is_empty());
        assert!(Node::text("x").children().is_empty());
        assert!(Node::EmbeddedAsset(None).children().is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = Document::from_json("{ \"nodeType\": ").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_wrong_shape_is_error() {
        // `content` must be an array
        let err = Document::from_json(r#"{ "nodeType": "paragraph", "content": 3 }"#).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
