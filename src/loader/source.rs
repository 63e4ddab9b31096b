//! Where articles come from.

use crate::article::Article;
use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain article data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to `{url}` failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected article data from `{url}`")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The requested record does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Read access to the article collection.
///
/// Lets the loader run against the HTTP API or against in-memory data.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// One article by slug (`GET /academy/{slug}`).
    async fn fetch_article(&self, slug: &str) -> Result<Article, FetchError>;

    /// Every article (`GET /academy`).
    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError>;
}
