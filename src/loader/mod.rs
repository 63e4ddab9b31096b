//! Article loading: one article by slug, then its related articles.
//!
//! # Pipeline
//!
//! ```text
//! load(slug)
//!     │
//!     ├── fetch_article(slug) ──► Err ─► Error("Failed to load article")
//!     │        │                          (related never requested)
//!     │        ▼ Ok
//!     │   Loaded { related: None }
//!     │        │
//!     └── fetch_articles() ─► same track, other slug, ≤ 6
//!              │                (Err → logged, empty list)
//!              ▼
//!         Loaded { related: Some(..) }
//! ```
//!
//! [`load_view`] runs the pipeline to completion for one-shot callers
//! (`build`, `serve`, `toc`). [`ArticleLoader`] keeps per-view state for
//! callers that navigate between slugs and need to observe transitions.

mod http;
mod related;
mod source;

#[cfg(test)]
pub mod mock;

pub use http::HttpSource;
pub use related::{load_related, select_related};
pub use source::{ContentSource, FetchError};

use crate::{article::Article, log};
use academy_richtext::{Heading, extract_headings};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

/// Message shown in place of the page body when the primary fetch fails.
pub const LOAD_FAILED: &str = "Failed to load article";

// ============================================================================
// View Model
// ============================================================================

/// Everything a page needs about one article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleView {
    pub article: Article,
    /// Table of contents, extracted once when the view is built.
    pub headings: Vec<Heading>,
    /// `None` while the related fetch is still pending.
    pub related: Option<Vec<Article>>,
}

impl ArticleView {
    pub fn new(article: Article) -> Self {
        let headings = article
            .content
            .as_ref()
            .map(|content| extract_headings(content.root()))
            .unwrap_or_default();

        Self {
            article,
            headings,
            related: None,
        }
    }

    pub fn with_related(mut self, related: Vec<Article>) -> Self {
        self.related = Some(related);
        self
    }

    /// Related articles, empty while pending.
    pub fn related(&self) -> &[Article] {
        self.related.as_deref().unwrap_or_default()
    }
}

/// Fetch an article, then its related articles.
///
/// Only the primary fetch can fail; the related step degrades to an empty
/// list.
pub async fn load_view<S>(source: &S, slug: &str) -> Result<ArticleView, FetchError>
where
    S: ContentSource + ?Sized,
{
    let view = ArticleView::new(source.fetch_article(slug).await?);
    let related = load_related(source, slug, view.article.track.as_deref()).await;
    Ok(view.with_related(related))
}

// ============================================================================
// Stateful Loader
// ============================================================================

/// Observable state of an [`ArticleLoader`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        slug: String,
    },
    Loaded(Arc<ArticleView>),
    Error {
        slug: String,
        message: String,
    },
}

impl LoadState {
    /// No further transition will happen without a new slug.
    pub fn is_settled(&self) -> bool {
        match self {
            Self::Idle | Self::Error { .. } => true,
            Self::Loading { .. } => false,
            Self::Loaded(view) => view.related.is_some(),
        }
    }
}

/// Article state for one view, keyed to the current slug.
///
/// `Idle → Loading → {Loaded, Error}`; a new slug re-enters `Loading`.
/// Requesting the current slug again does nothing, including after an
/// error. Starting a new slug aborts the previous pipeline, and every
/// publish is checked against the current generation, so a late response
/// for an old slug is dropped instead of overwriting newer state.
///
/// `load` spawns onto the ambient tokio runtime.
pub struct ArticleLoader<S> {
    source: Arc<S>,
    inner: Arc<Inner>,
}

struct Inner {
    current: Mutex<Current>,
    state: watch::Sender<LoadState>,
}

#[derive(Default)]
struct Current {
    slug: Option<String>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Inner {
    /// Publish `state` if `generation` is still the current one.
    fn publish(&self, generation: u64, state: LoadState) -> bool {
        let current = self.current.lock();
        if current.generation != generation {
            return false;
        }
        self.state.send_replace(state);
        true
    }
}

impl<S: ContentSource + 'static> ArticleLoader<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source,
            inner: Arc::new(Inner {
                current: Mutex::new(Current::default()),
                state,
            }),
        }
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.inner.state.borrow().clone()
    }

    /// Navigate to `slug`.
    pub fn load(&self, slug: &str) {
        let mut current = self.inner.current.lock();
        if current.slug.as_deref() == Some(slug) {
            return;
        }

        if let Some(task) = current.task.take() {
            task.abort();
        }
        current.generation += 1;
        current.slug = Some(slug.to_owned());
        self.inner.state.send_replace(LoadState::Loading {
            slug: slug.to_owned(),
        });

        let pipeline = run_pipeline(
            Arc::clone(&self.source),
            Arc::clone(&self.inner),
            slug.to_owned(),
            current.generation,
        );
        current.task = Some(tokio::spawn(pipeline));
    }

    /// Wait until the current state is settled and return it.
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.subscribe();
        match rx.wait_for(LoadState::is_settled).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.state(),
        }
    }
}

impl<S> Drop for ArticleLoader<S> {
    fn drop(&mut self) {
        if let Some(task) = self.inner.current.lock().task.take() {
            task.abort();
        }
    }
}

async fn run_pipeline<S>(source: Arc<S>, inner: Arc<Inner>, slug: String, generation: u64)
where
    S: ContentSource + ?Sized,
{
    let article = match source.fetch_article(&slug).await {
        Ok(article) => article,
        Err(err) => {
            log!("fetch"; "{LOAD_FAILED} `{slug}`: {err}");
            inner.publish(
                generation,
                LoadState::Error {
                    slug,
                    message: LOAD_FAILED.to_owned(),
                },
            );
            return;
        }
    };

    let view = ArticleView::new(article);
    let track = view.article.track.clone();
    if !inner.publish(generation, LoadState::Loaded(Arc::new(view.clone()))) {
        return;
    }

    let related = load_related(source.as_ref(), &slug, track.as_deref()).await;
    inner.publish(
        generation,
        LoadState::Loaded(Arc::new(view.with_related(related))),
    );
}

// ============================================================================
// Tests
// ============================================================================
