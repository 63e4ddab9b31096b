//! Rich-text documents as delivered by a headless CMS.
//!
//! - [`node`]: the typed tree (`Document`, `Node`) decoded from JSON
//! - [`heading`]: table-of-contents extraction
//! - [`render`]: HTML fragment rendering
//! - [`slug`]: the anchor id function shared by the two above
//!
//! # Example
//!
//! ```
//! use academy_richtext::{Document, extract_headings, render_html};
//!
//! let doc = Document::from_json(
//!     r#"{"nodeType":"heading-1","content":[{"value":"Hello World"}]}"#,
//! ).unwrap();
//!
//! let toc = extract_headings(doc.root());
//! assert_eq!(toc[0].id, "hello-world");
//! assert_eq!(render_html(doc.root()), r#"<h1 id="hello-world">Hello World</h1>"#);
//! ```

pub mod heading;
pub mod node;
pub mod render;
pub mod slug;

pub use heading::{Heading, extract_headings, heading_text};
pub use node::{Asset, Document, DocumentError, HeadingLevel, Mark, Node, Text};
pub use render::{render_html, render_node};
pub use slug::heading_id;
