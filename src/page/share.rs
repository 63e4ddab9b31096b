//! Share controls: copy link, Facebook, X.

use quick_xml::escape::escape;

const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const X_INTENT: &str = "https://x.com/intent/tweet";

/// Outbound share targets for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    /// The page itself, copied to the clipboard by the copy button.
    pub page_url: String,
    pub facebook: String,
    pub x: String,
}

impl ShareLinks {
    pub fn new(page_url: &str, title: &str) -> Self {
        let url = urlencoding::encode(page_url);
        Self {
            page_url: page_url.to_owned(),
            facebook: format!("{FACEBOOK_SHARER}?u={url}"),
            x: format!("{X_INTENT}?url={url}&text={}", urlencoding::encode(title)),
        }
    }

    /// Append the share controls.
    pub fn render(&self, out: &mut String) {
        out.push_str(&format!(
            concat!(
                r#"<div class="share">"#,
                r#"<button type="button" class="copy-link" data-url="{}">Copy link</button>"#,
                r#"<a class="share-facebook" href="{}" target="_blank" rel="noopener">Facebook</a>"#,
                r#"<a class="share-x" href="{}" target="_blank" rel="noopener">X</a>"#,
                "</div>"
            ),
            escape(self.page_url.as_str()),
            escape(self.facebook.as_str()),
            escape(self.x.as_str()),
        ));
    }
}
