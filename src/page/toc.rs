//! Table of contents.

use academy_richtext::Heading;
use quick_xml::escape::escape;

/// Append the "Contents" block, one `#id` link per heading.
pub fn render_toc(headings: &[Heading], out: &mut String) {
    out.push_str(r#"<div class="toc"><h2>Contents</h2><ul>"#);
    for heading in headings {
        out.push_str(&format!(
            r##"<li class="toc-h{}"><a href="#{}">{}</a></li>"##,
            heading.level.as_u8(),
            escape(heading.id.as_str()),
            escape(heading.text.as_str()),
        ));
    }
    out.push_str("</ul></div>");
}

/// Plain-text outline for the terminal, second-level entries indented.
pub fn format_toc_text(headings: &[Heading]) -> String {
    headings
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level.as_u8() - 1));
            format!("{indent}- {} (#{})", heading.text, heading.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_richtext::HeadingLevel;

    fn headings() -> Vec<Heading> {
        vec![
            Heading {
                id: "what-is-a-dao".into(),
                text: "What is a DAO".into(),
                level: HeadingLevel::H1,
            },
            Heading {
                id: "voting-&-quorum".into(),
                text: "Voting & Quorum".into(),
                level: HeadingLevel::H2,
            },
        ]
    }

    #[test]
    fn test_render_toc() {
        let mut html = String::new();
        render_toc(&headings(), &mut html);
        assert!(html.starts_with(r#"<div class="toc"><h2>Contents</h2><ul>"#));
        assert!(html.contains(r##"<a href="#what-is-a-dao">What is a DAO</a>"##));
        assert!(html.contains(r##"<li class="toc-h2"><a href="#voting-&amp;-quorum">Voting &amp; Quorum</a>"##));
    }

    #[test]
    fn test_render_empty_toc() {
        let mut html = String::new();
        render_toc(&[], &mut html);
        assert_eq!(html, r#"<div class="toc"><h2>Contents</h2><ul></ul></div>"#);
    }

    #[test]
    fn test_format_toc_text() {
        assert_eq!(
            format_toc_text(&headings()),
            "- What is a DAO (#what-is-a-dao)\n  - Voting & Quorum (#voting-&-quorum)"
        );
    }
}
