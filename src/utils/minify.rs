//! HTML minification, switched by `[build].minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered page.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify_html<'a>(html: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(html);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_minify(enabled: bool) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.minify = enabled;
        config
    }

    #[test]
    fn test_minify_removes_whitespace() {
        let html = b"<html>\n  <body>\n    <p>Hello World</p>\n  </body>\n</html>";
        let result = minify_html(html, &config_with_minify(true));
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains("\n  "));
        assert!(result.contains("Hello World"));
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<p>\n  x\n</p>";
        let result = minify_html(html, &config_with_minify(false));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);
    }
}
