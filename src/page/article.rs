//! Article page and the error page shown when it cannot be loaded.
//!
//! ```text
//! Academy > {title}
//! ┌──────────────────────────────┐
//! │ {title}                      │
//! │ Published {date}    [share]  │
//! │ [thumbnail]                  │
//! │ Contents        │ body       │
//! └──────────────────────────────┘
//! More Articles: [card] [card] ...
//! ```

use super::{ShareLinks, layout::render_layout, render_toc};
use crate::{
    article::Article,
    config::SiteConfig,
    loader::ArticleView,
    utils::date::format_timestamp,
};
use academy_richtext::render_node;
use quick_xml::escape::escape;

/// Shown in place of the body when the article has no rich-text content.
pub const NO_CONTENT: &str = "Content is not available.";

/// Render a complete article page.
pub fn render_article_page(config: &SiteConfig, view: &ArticleView) -> String {
    let article = &view.article;
    let title = escape(article.post_heading.as_str());
    let mut body = String::with_capacity(4096);

    body.push_str(r#"<section class="article">"#);
    body.push_str(&format!(
        r#"<nav class="breadcrumb"><a href="/academy">Academy</a> <span>&gt;</span> <span class="current">{title}</span></nav>"#
    ));

    body.push_str(r#"<div class="article-main">"#);
    body.push_str(&format!(r#"<h1 class="article-title">{title}</h1>"#));

    body.push_str(r#"<div class="article-meta">"#);
    if let Some(timestamp) = &article.timestamp {
        body.push_str(&format!(
            r#"<p class="published">Published {}</p>"#,
            escape(format_timestamp(timestamp).as_str())
        ));
    }
    if let Some(author) = article.author_name() {
        body.push_str(&format!(r#"<p class="author">{}</p>"#, escape(author)));
    }
    ShareLinks::new(&config.article_url(&article.slug), &article.post_heading).render(&mut body);
    body.push_str("</div>");

    if let Some(image) = article.image() {
        body.push_str(&format!(
            r#"<img class="thumbnail" src="{}" alt="Article thumbnail"/>"#,
            escape(image)
        ));
    }

    match &article.content {
        Some(content) => {
            body.push_str(r#"<div class="article-content">"#);
            render_toc(&view.headings, &mut body);
            body.push_str(r#"<div class="article-body">"#);
            render_node(content.root(), &mut body);
            body.push_str("</div></div>");
        }
        None => body.push_str(&format!(r#"<p class="no-content">{NO_CONTENT}</p>"#)),
    }
    body.push_str("</div>");

    let related = view.related();
    if !related.is_empty() {
        body.push_str(r#"<div class="more-articles"><h2>More Articles</h2><div class="cards">"#);
        for other in related {
            render_card(other, &mut body);
        }
        body.push_str("</div></div>");
    }
    body.push_str("</section>");

    render_layout(config, &article.post_heading, &body)
}

/// Render the page shown when the primary fetch failed.
pub fn render_error_page(config: &SiteConfig, message: &str) -> String {
    let body = format!(r#"<div class="error">{}</div>"#, escape(message));
    render_layout(config, "", &body)
}

/// Append a summary card linking to `article`.
pub fn render_card(article: &Article, out: &mut String) {
    let heading = escape(article.post_heading.as_str());
    out.push_str(&format!(
        r#"<a class="card" href="/academy/{}">"#,
        urlencoding::encode(&article.slug)
    ));

    out.push_str(r#"<div class="card-image">"#);
    if let Some(image) = article.image() {
        out.push_str(&format!(r#"<img src="{}" alt="{heading}"/>"#, escape(image)));
    }
    out.push_str(&format!("<h3>{heading}</h3></div>"));

    out.push_str(r#"<div class="card-body">"#);
    if let Some(timestamp) = &article.timestamp {
        out.push_str(&format!(
            r#"<p class="date">{}</p>"#,
            escape(format_timestamp(timestamp).as_str())
        ));
    }
    if let Some(description) = article.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!(r#"<p class="description">{}</p>"#, escape(description)));
    }
    if let Some(track) = &article.track {
        out.push_str(&format!(r#"<span class="track">{}</span>"#, escape(track.as_str())));
    }
    out.push_str("</div></a>");
}
