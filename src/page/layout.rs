//! Site shell wrapped around every page: head, header, footer.

use crate::config::SiteConfig;
use quick_xml::escape::escape;

/// Page skeleton (embedded at compile time)
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

/// Clipboard handler for `.copy-link` buttons
const COPY_LINK_SCRIPT: &str = include_str!("../embed/copy-link.js");

/// Wrap a rendered body in the site layout.
///
/// `title` is the page title; the document `<title>` becomes
/// `{title} | {site title}`, or just the site title when `title` is empty.
/// `body` is inserted as-is and must already be escaped.
pub fn render_layout(config: &SiteConfig, title: &str, body: &str) -> String {
    let site_title = &config.base.title;
    let document_title = if title.is_empty() {
        site_title.clone()
    } else {
        format!("{title} | {site_title}")
    };

    fill_template(
        LAYOUT_TEMPLATE,
        &[
            ("lang", &*escape(config.base.language.as_str())),
            ("description", &*escape(config.base.description.as_str())),
            ("title", &*escape(document_title.as_str())),
            ("site_title", &*escape(site_title.as_str())),
            ("copyright", &*escape(config.base.copyright.as_str())),
            ("script", COPY_LINK_SCRIPT),
            ("body", body),
        ],
    )
}

/// Replace `{key}` placeholders in one pass.
///
/// Substituted values are never rescanned, so a value containing `{body}`
/// stays literal. Unknown placeholders are kept verbatim.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
