//! `[base]` section configuration.
//!
//! Site identity: title, public url, language and footer text.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in academy.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Web3Fruity"
/// description = "Learn web3, one article at a time"
/// url = "https://web3fruity.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used for `<title>` and the header.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Site description for the `description` meta tag.
    #[serde(default)]
    pub description: String,

    /// Public URL of the site. Share links and copied links are built on it;
    /// without it they fall back to site-relative paths.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code for `<html lang>`.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for site footer.
    #[serde(default)]
    pub copyright: String,
}
