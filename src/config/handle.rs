//! Process-wide config handle.
//!
//! Uses `arc-swap` for lock-free reads. The config is stored once at
//! startup and read from any thread (rayon page workers, the tokio loader
//! tasks, the serve loop) without passing it down every call chain.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! render_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
///
/// Holds the default config until `init_config` runs in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Get current config as `Arc<SiteConfig>`.
///
/// Wait-free; the returned `Arc` stays valid even if the config is replaced.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Install the loaded config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    CONFIG.store(Arc::new(config));
}
