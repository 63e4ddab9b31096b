//! Interactive navigation: one slug per line on stdin.
//!
//! Each line moves the view to a new article. State transitions published
//! by the [`ArticleLoader`] are reported as they arrive, so a slow article
//! that is navigated away from never shows up.

use crate::{
    loader::{ArticleLoader, ContentSource, LoadState},
    log,
    page::format_toc_text,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Read slugs from stdin until EOF or `quit`.
pub async fn browse<S>(source: Arc<S>) -> Result<()>
where
    S: ContentSource + 'static,
{
    let loader = ArticleLoader::new(source);
    let mut rx = loader.subscribe();

    let printer = tokio::spawn(async move {
        let mut reporter = Reporter::default();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            for line in reporter.report(&state) {
                log!("browse"; "{line}");
            }
        }
    });

    log!("browse"; "enter a slug, `quit` to exit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            slug => loader.load(slug),
        }
    }

    loader.settled().await;
    // Closes the channel once the pipeline task is gone, ending the printer.
    drop(loader);
    printer.await.ok();
    Ok(())
}

/// Turns state transitions into terminal lines.
///
/// The table of contents is reported once per article even when the
/// intermediate `Loaded { related: None }` state was coalesced away.
#[derive(Debug, Default)]
struct Reporter {
    toc_reported: Option<String>,
}

impl Reporter {
    fn report(&mut self, state: &LoadState) -> Vec<String> {
        match state {
            LoadState::Idle => vec![],
            LoadState::Loading { slug } => {
                self.toc_reported = None;
                vec![format!("loading `{slug}`...")]
            }
            LoadState::Error { slug, message } => vec![format!("{message} `{slug}`")],
            LoadState::Loaded(view) => {
                let mut lines = Vec::new();
                let slug = &view.article.slug;

                if self.toc_reported.as_deref() != Some(slug.as_str()) {
                    self.toc_reported = Some(slug.clone());
                    lines.push(view.article.post_heading.clone());
                    if view.headings.is_empty() {
                        lines.push("(no headings)".to_owned());
                    } else {
                        lines.push(format_toc_text(&view.headings));
                    }
                }

                if let Some(related) = &view.related {
                    let slugs: Vec<_> = related.iter().map(|a| a.slug.as_str()).collect();
                    lines.push(match slugs.as_slice() {
                        [] => "no more articles".to_owned(),
                        slugs => format!("more articles: {}", slugs.join(", ")),
                    });
                }
                lines
            }
        }
    }
}
