//! `[api]` section configuration.
//!
//! Where articles come from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[api]` section in academy.toml - content API endpoint.
///
/// # Example
/// ```toml
/// [api]
/// url = "https://api.web3fruity.com"
/// timeout_secs = 5
/// ```
///
/// Articles are read from `{url}/academy` and `{url}/academy/{slug}`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL of the content API. Required; may also come from
    /// `--api-url` or `ACADEMY_API_URL`.
    #[serde(default = "defaults::api::url")]
    #[educe(Default = defaults::api::url())]
    pub url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "defaults::api::timeout_secs")]
    #[educe(Default = defaults::api::timeout_secs())]
    pub timeout_secs: u64,
}
