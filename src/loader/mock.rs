//! In-memory content source for tests.

use super::source::{ContentSource, FetchError};
use crate::article::Article;
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

/// Minimal article with a heading in its body.
pub fn article(slug: &str, track: Option<&str>) -> Article {
    serde_json::from_value(serde_json::json!({
        "_id": format!("id-{slug}"),
        "slug": slug,
        "postHeading": format!("Title {slug}"),
        "track": track,
        "timestamp": "2024-03-07T10:00:00Z",
        "description": format!("About {slug}"),
        "content": {
            "nodeType": "document",
            "content": [
                { "nodeType": "heading-1", "content": [
                    { "nodeType": "text", "value": format!("Heading {slug}"), "marks": [] }
                ]},
                { "nodeType": "paragraph", "content": [
                    { "nodeType": "text", "value": "Body text", "marks": [] }
                ]}
            ]
        }
    }))
    .unwrap()
}

/// Serves a fixed collection, with optional per-slug latency and a
/// switchable collection failure. Counts calls.
pub struct MockSource {
    articles: Vec<Article>,
    delays: HashMap<String, Duration>,
    fail_collection: bool,
    pub article_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl MockSource {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            delays: HashMap::new(),
            fail_collection: false,
            article_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, slug: &str, delay: Duration) -> Self {
        self.delays.insert(slug.to_owned(), delay);
        self
    }

    pub fn failing_collection(mut self) -> Self {
        self.fail_collection = true;
        self
    }
}

#[async_trait]
impl ContentSource for MockSource {
    async fn fetch_article(&self, slug: &str) -> Result<Article, FetchError> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(slug) {
            tokio::time::sleep(*delay).await;
        }
        self.articles
            .iter()
            .find(|a| a.slug == slug)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("/academy/{slug}"),
                status: 404,
            })
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_collection {
            return Err(FetchError::Status {
                url: "/academy".into(),
                status: 500,
            });
        }
        Ok(self.articles.clone())
    }
}
