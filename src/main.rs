//! Academy - render rich-text academy articles from a headless content API.

mod article;
mod browse;
mod build;
mod cli;
mod config;
mod loader;
mod logger;
mod page;
mod serve;
mod utils;

use anyhow::{Context, Result};
use browse::browse;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use loader::{HttpSource, LOAD_FAILED, load_view};
use page::format_toc_text;
use serve::serve_site;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_config(SiteConfig::load(&cli)?);
    let config = cfg();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let source = HttpSource::from_config(&config.api)?;

    match &cli.command {
        Commands::Build { slugs, .. } => build_site(&runtime, &source, &config, slugs).map(|_| ()),
        Commands::Serve { .. } => serve_site(&runtime, &source),
        Commands::Toc { slug } => {
            let view = runtime
                .block_on(load_view(&source, slug))
                .with_context(|| format!("{LOAD_FAILED} `{slug}`"))?;
            println!("{}", view.article.post_heading);
            println!("{}", format_toc_text(&view.headings));
            Ok(())
        }
        Commands::Browse => runtime.block_on(browse(Arc::new(source))),
    }
}
