//! Static rendering of academy pages.
//!
//! # Architecture
//!
//! ```text
//! build_site(slugs)
//!     │
//!     ├── prepare_output() ──► clean / create output dir
//!     │
//!     ├── slugs empty?
//!     │     ├── yes: fetch_articles() once
//!     │     │        related selected from the same list
//!     │     │        + academy/index.html
//!     │     └── no:  load_view(slug) per slug
//!     │
//!     └── write pages (rayon) ──► academy/{slug}/index.html
//! ```

use crate::{
    article::Article,
    config::SiteConfig,
    loader::{ArticleView, ContentSource, LOAD_FAILED, load_view, select_related},
    log,
    logger::ProgressBar,
    page::{render_article_page, render_index_page},
    utils::minify::minify_html,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{fs, path::Path};
use tokio::runtime::Runtime;

/// Directory under the output root holding every article page.
const ACADEMY_DIR: &str = "academy";

/// Fetch and render pages into `[build].output`.
///
/// Renders every article plus the index when `slugs` is empty, otherwise
/// only the named articles. Any failed primary fetch aborts the build.
/// Returns the number of pages written.
pub fn build_site<S>(
    runtime: &Runtime,
    source: &S,
    config: &SiteConfig,
    slugs: &[String],
) -> Result<usize>
where
    S: ContentSource + ?Sized,
{
    if let Some(slug) = slugs.iter().find(|slug| !is_safe_slug(slug)) {
        bail!("invalid slug `{slug}`");
    }

    prepare_output(&config.build.output, config.build.clean)?;

    let (views, index) = if slugs.is_empty() {
        let articles = runtime
            .block_on(source.fetch_articles())
            .context("Failed to load articles")?;
        log!("fetch"; "{} articles", articles.len());
        (collect_views(&articles), Some(articles))
    } else {
        let views = runtime.block_on(async {
            let mut views = Vec::with_capacity(slugs.len());
            for slug in slugs {
                let view = load_view(source, slug)
                    .await
                    .with_context(|| format!("{LOAD_FAILED} `{slug}`"))?;
                views.push(view);
            }
            anyhow::Ok(views)
        })?;
        (views, None)
    };

    let progress = ProgressBar::new("pages", views.len());
    views.par_iter().try_for_each(|view| {
        let html = render_article_page(config, view);
        let path = Path::new(ACADEMY_DIR).join(&view.article.slug).join("index.html");
        write_page(&config.build.output, &path, &html, config)?;
        progress.inc();
        anyhow::Ok(())
    })?;
    progress.finish();

    let mut written = views.len();
    if let Some(articles) = index {
        let html = render_index_page(config, &articles);
        write_page(
            &config.build.output,
            &Path::new(ACADEMY_DIR).join("index.html"),
            &html,
            config,
        )?;
        written += 1;
    }

    log!("build"; "{} pages written to {}", written, config.build.output.display());
    Ok(written)
}

/// Views for a full build, related articles picked from the same collection.
///
/// Articles whose slug cannot be used as a directory name are skipped.
fn collect_views(articles: &[Article]) -> Vec<ArticleView> {
    let usable: Vec<Article> = articles
        .iter()
        .filter(|article| {
            let safe = is_safe_slug(&article.slug);
            if !safe {
                log!("build"; "skipping article with unusable slug `{}`", article.slug);
            }
            safe
        })
        .cloned()
        .collect();

    usable
        .iter()
        .map(|article| {
            let related = select_related(&usable, &article.slug, article.track.as_deref());
            ArticleView::new(article.clone()).with_related(related)
        })
        .collect()
}

/// A slug must map to exactly one directory below `academy/`.
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.chars().any(char::is_control)
}

fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        log!("build"; "cleaning {}", output.display());
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))
}

fn write_page(output: &Path, relative: &Path, html: &str, config: &SiteConfig) -> Result<()> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = minify_html(html.as_bytes(), config);
    fs::write(&path, &*content).with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
