//! "More Articles": other articles on the same track.

use super::source::ContentSource;
use crate::{article::Article, log};

/// Upper bound on related articles shown under a page.
pub const MAX_RELATED: usize = 6;

/// Articles sharing `track`, excluding `slug` itself, in collection order,
/// at most [`MAX_RELATED`].
///
/// An article without a track matches other articles without a track.
pub fn select_related(all: &[Article], slug: &str, track: Option<&str>) -> Vec<Article> {
    all.iter()
        .filter(|article| article.slug != slug && article.track.as_deref() == track)
        .take(MAX_RELATED)
        .cloned()
        .collect()
}

/// Fetch the collection and select the related articles.
///
/// Never fails: a fetch error is logged and yields an empty list.
pub async fn load_related<S>(source: &S, slug: &str, track: Option<&str>) -> Vec<Article>
where
    S: ContentSource + ?Sized,
{
    match source.fetch_articles().await {
        Ok(all) => select_related(&all, slug, track),
        Err(err) => {
            log!("related"; "failed to load additional articles: {err}");
            Vec::new()
        }
    }
}
