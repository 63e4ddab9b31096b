//! Academy landing page: one card per article, grouped by track.

use super::{layout::render_layout, render_card};
use crate::{article::Article, config::SiteConfig};
use quick_xml::escape::escape;

/// Heading for articles without a track.
const UNTRACKED: &str = "General";

/// Render `/academy`, tracks in first-seen order.
pub fn render_index_page(config: &SiteConfig, articles: &[Article]) -> String {
    let mut tracks: Vec<(Option<&str>, Vec<&Article>)> = Vec::new();
    for article in articles {
        let track = article.track.as_deref();
        match tracks.iter_mut().find(|(name, _)| *name == track) {
            Some((_, group)) => group.push(article),
            None => tracks.push((track, vec![article])),
        }
    }

    let mut body = String::with_capacity(1024 + articles.len() * 512);
    body.push_str(r#"<section class="academy"><h1>Academy</h1>"#);
    for (track, group) in &tracks {
        body.push_str(&format!(
            r#"<div class="track-group"><h2>{}</h2><div class="cards">"#,
            escape(track.unwrap_or(UNTRACKED))
        ));
        for article in group {
            render_card(article, &mut body);
        }
        body.push_str("</div></div>");
    }
    body.push_str("</section>");

    render_layout(config, "Academy", &body)
}
