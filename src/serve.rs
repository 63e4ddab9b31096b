//! Preview server rendering pages on demand.
//!
//! Every request fetches fresh content from the API, so edits in the CMS
//! show up on reload without a rebuild.
//!
//! # Routes
//!
//! | Path                 | Response                                  |
//! |----------------------|-------------------------------------------|
//! | `/`, `/academy`      | index page                                |
//! | `/academy/{slug}`    | article page, or the error page (404/502) |
//! | anything else        | 404 Not Found                             |

use crate::{
    config::{SiteConfig, cfg},
    loader::{ContentSource, LOAD_FAILED, load_view},
    log,
    page::{render_article_page, render_error_page, render_index_page},
};
use anyhow::{Context, Result, anyhow};
use std::{
    io::Cursor,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};
use tokio::runtime::Runtime;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Shown when the article collection cannot be fetched.
const INDEX_FAILED: &str = "Failed to load articles";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve pages until Ctrl+C.
///
/// Requests are handled one at a time on the calling thread; API calls are
/// driven on `runtime`.
pub fn serve_site<S>(runtime: &Runtime, source: &S) -> Result<()>
where
    S: ContentSource + ?Sized,
{
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("invalid interface `{}`", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}/academy", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, runtime, source, &c) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Index,
    Article(String),
    NotFound,
}

/// Map a request url to a route.
///
/// The query string is ignored and percent-escapes in the slug are decoded.
fn route(url: &str) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let Ok(path) = urlencoding::decode(path) else {
        return Route::NotFound;
    };

    match path.trim_matches('/') {
        "" | "academy" => Route::Index,
        path => match path.strip_prefix("academy/") {
            Some(slug) if !slug.is_empty() && !slug.contains('/') => {
                Route::Article(slug.to_owned())
            }
            _ => Route::NotFound,
        },
    }
}

/// Rendered response before it is written to the socket.
#[derive(Debug)]
struct Page {
    status: u16,
    html: String,
}

/// Fetch and render whatever `route` points at.
fn render_route<S>(runtime: &Runtime, source: &S, config: &SiteConfig, route: &Route) -> Option<Page>
where
    S: ContentSource + ?Sized,
{
    let page = match route {
        Route::NotFound => return None,
        Route::Index => match runtime.block_on(source.fetch_articles()) {
            Ok(articles) => Page {
                status: 200,
                html: render_index_page(config, &articles),
            },
            Err(err) => {
                log!("fetch"; "{INDEX_FAILED}: {err}");
                Page {
                    status: 502,
                    html: render_error_page(config, INDEX_FAILED),
                }
            }
        },
        Route::Article(slug) => match runtime.block_on(load_view(source, slug)) {
            Ok(view) => Page {
                status: 200,
                html: render_article_page(config, &view),
            },
            Err(err) => {
                log!("fetch"; "{LOAD_FAILED} `{slug}`: {err}");
                Page {
                    status: if err.is_not_found() { 404 } else { 502 },
                    html: render_error_page(config, LOAD_FAILED),
                }
            }
        },
    };
    Some(page)
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request<S>(request: Request, runtime: &Runtime, source: &S, config: &SiteConfig) -> Result<()>
where
    S: ContentSource + ?Sized,
{
    let route = route(request.url());
    match render_route(runtime, source, config, &route) {
        Some(page) => serve_html(request, page),
        None => serve_not_found(request),
    }
}

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("invalid header value `{value}`"))
}

/// Serve a rendered page.
fn serve_html(request: Request, page: Page) -> Result<()> {
    let response = Response::from_string(page.html)
        .with_status_code(StatusCode(page.status))
        .with_header(content_type("text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain")?],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
