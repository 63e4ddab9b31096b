//! HTTP client for the content API.

use super::source::{ContentSource, FetchError};
use crate::{article::Article, log};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// `reqwest`-backed [`ContentSource`].
///
/// Every call is a fresh request: no caching, no retries.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Build from the `[api]` config section.
    pub fn from_config(api: &crate::config::ApiConfig) -> Result<Self> {
        let url = api
            .url
            .as_deref()
            .ok_or_else(|| anyhow!("[api.url] is not set"))?;
        Self::new(url, Duration::from_secs(api.timeout_secs))
    }

    fn article_url(&self, slug: &str) -> String {
        format!("{}/academy/{}", self.base_url, urlencoding::encode(slug))
    }

    fn collection_url(&self) -> String {
        format!("{}/academy", self.base_url)
    }

    /// GET `url` and decode the JSON body.
    ///
    /// The body is read fully before decoding so transport and decode
    /// failures stay distinguishable.
    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        log!("fetch"; "GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Network { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => return Err(FetchError::Network { url, source }),
        };

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_article(&self, slug: &str) -> Result<Article, FetchError> {
        self.get_json(self.article_url(slug)).await
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError> {
        let url = self.collection_url();
        let records: Vec<Value> = self.get_json(url.clone()).await?;
        Ok(decode_records(&url, records))
    }
}

/// Decode collection entries one by one. A malformed entry is logged and
/// skipped; the rest of the collection survives.
fn decode_records(url: &str, records: Vec<Value>) -> Vec<Article> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(article) => Some(article),
            Err(err) => {
                log!("fetch"; "skipping entry {index} from `{url}`: {err}");
                None
            }
        })
        .collect()
}
