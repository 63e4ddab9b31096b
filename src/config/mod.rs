//! Site configuration management for `academy.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[base]`    | Site metadata (title, url, language)         |
//! | `[api]`     | Content API endpoint and timeout             |
//! | `[build]`   | Output directory, minify, clean              |
//! | `[serve]`   | Preview server (interface, port)             |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Web3Fruity"
//! url = "https://web3fruity.com"
//!
//! [api]
//! url = "https://api.web3fruity.com"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [serve]
//! port = 5277
//! ```

mod api;
mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
mod serve;

pub use api::ApiConfig;
pub use handle::{cfg, init_config};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing academy.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Resolve, load and validate the config for a CLI invocation.
    ///
    /// A missing config file is not an error: the API url can be given on
    /// the command line or through the environment instead.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let found = config_path.exists();
        let mut config = if found {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, root);
        config.validate()?;

        if found {
            log!("config"; "using {}", config.config_path.display());
        } else {
            log!("config"; "{} not found, using defaults", config.config_path.display());
        }

        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        if let Some(api_url) = &cli.api_url {
            self.api.url = Some(api_url.clone());
        }

        match &cli.command {
            Commands::Build {
                output,
                clean,
                minify,
                ..
            } => {
                Self::update_option(&mut self.build.output, output.as_ref());
                Self::update_option(&mut self.build.minify, minify.as_ref());
                self.build.clean |= *clean;
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                if self.base.url.is_none() {
                    self.base.url = Some(format!(
                        "http://{}:{}",
                        self.serve.interface, self.serve.port
                    ));
                }
            }
            _ => {}
        }

        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        match &self.api.url {
            None => bail!(ConfigError::Validation(
                "[api.url] is required (or pass --api-url / ACADEMY_API_URL)".into()
            )),
            Some(url) if !is_http_url(url) => bail!(ConfigError::Validation(
                "[api.url] must start with http:// or https://".into()
            )),
            _ => {}
        }

        if self.api.timeout_secs == 0 {
            bail!(ConfigError::Validation(
                "[api.timeout_secs] must be greater than 0".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !is_http_url(base_url)
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }

    /// Public URL of an article page.
    ///
    /// Absolute when `[base.url]` is set, site-relative otherwise.
    pub fn article_url(&self, slug: &str) -> String {
        let base = self.base.url.as_deref().unwrap_or_default();
        format!(
            "{}/academy/{}",
            base.trim_end_matches('/'),
            urlencoding::encode(slug)
        )
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ============================================================================
// Tests
// ============================================================================
