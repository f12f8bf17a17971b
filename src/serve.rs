//! Development server for the built site.
//!
//! `lectern serve` builds once, then serves the output directory over
//! `tiny_http` on the main thread while a watcher thread (see `watch`)
//! rebuilds on change. Request handling stays small on purpose: resolve
//! the URL under the output directory, serve the file or the
//! directory's `index.html`, and fall back to the built `404.html` for
//! everything else. Ctrl+C unblocks the accept loop for a clean exit.

use crate::{
    config::{SiteConfig, cfg},
    log,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, bail};
use std::{
    borrow::Cow,
    fs,
    net::{IpAddr, SocketAddr},
    path::{Component, Path},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Ports probed upward from the configured one before giving up.
const PORT_ATTEMPTS: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Run the development server until Ctrl+C.
///
/// The config is re-read through `cfg()` for every request, so a hot
/// reload of `lectern.toml` (changing the output directory, say) takes
/// effect without restarting the server.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c.serve.interface.parse()?;

    let (server, addr) = bind_with_fallback(interface, c.serve.port)?;
    let server = Arc::new(server);

    let acceptor = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        acceptor.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{addr}");

    if c.serve.watch {
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {err}");
        }
    }

    Ok(())
}

/// Bind the configured port, walking upward past ports already in use.
fn bind_with_fallback(interface: IpAddr, first: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;

    for offset in 0..PORT_ATTEMPTS {
        let addr = SocketAddr::new(interface, first.saturating_add(offset));
        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {first} busy, listening on {} instead", addr.port());
                }
                return Ok((server, addr));
            }
            Err(err) => last_err = Some(err),
        }
    }

    bail!(
        "every port from {} to {} is taken: {}",
        first,
        first.saturating_add(PORT_ATTEMPTS - 1),
        last_err.map_or_else(String::new, |err| err.to_string())
    )
}

// ============================================================================
// Request Handling
// ============================================================================

/// Serve one request from the output directory.
///
/// An exact file wins, then a directory's `index.html`. Anything else,
/// including URLs that try to escape the output directory, gets the 404
/// document.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let root = &config.build.output;

    match resolve_request_path(request.url()).map(|rel| root.join(rel)) {
        Some(path) if path.is_file() => respond_with_file(request, &path),
        Some(path) if path.join("index.html").is_file() => {
            respond_with_file(request, &path.join("index.html"))
        }
        _ => respond_not_found(request, root),
    }
}

/// Decode the request URL into a path relative to the serve root.
///
/// The query string is dropped (cache-busting timestamps), and any URL
/// whose decoded form steps through `..` resolves to `None`.
fn resolve_request_path(url: &str) -> Option<String> {
    let decoded = urlencoding::decode(url).map_or_else(|_| String::new(), Cow::into_owned);
    let path = decoded
        .split('?')
        .next()
        .unwrap_or_default()
        .trim_matches('/');

    let escapes = Path::new(path)
        .components()
        .any(|part| matches!(part, Component::ParentDir));

    (!escapes).then(|| path.to_owned())
}

// ============================================================================
// Responses
// ============================================================================

fn respond_with_file(request: Request, path: &Path) -> Result<()> {
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(body)
        .with_header(Header::from_bytes("Content-Type", mime_for(path)).unwrap());

    request.respond(response)?;
    Ok(())
}

/// The built `404.html` with a 404 status, or bare text when no build
/// has produced one yet.
fn respond_not_found(request: Request, root: &Path) -> Result<()> {
    let response = match fs::read(root.join("404.html")) {
        Ok(page) => Response::from_data(page)
            .with_status_code(StatusCode(404))
            .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()),
        Err(_) => {
            Response::from_data(b"404 Not Found".to_vec()).with_status_code(StatusCode(404))
        }
    };

    request.respond(response)?;
    Ok(())
}

/// MIME type from the file extension, `application/octet-stream` when
/// unrecognized.
fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or_default() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_strips_slashes_and_query() {
        assert_eq!(resolve_request_path("/"), Some(String::new()));
        assert_eq!(resolve_request_path("/research/"), Some("research".into()));
        assert_eq!(
            resolve_request_path("/styles/site.css?t=123456"),
            Some("styles/site.css".into())
        );
    }

    #[test]
    fn test_request_path_decodes_percent_encoding() {
        assert_eq!(
            resolve_request_path("/documents/cv%202026.pdf"),
            Some("documents/cv 2026.pdf".into())
        );
    }

    #[test]
    fn test_request_path_rejects_parent_traversal() {
        assert_eq!(resolve_request_path("/../secrets.toml"), None);
        assert_eq!(resolve_request_path("/images/../../lectern.toml"), None);
        // Encoded dots must not slip through either.
        assert_eq!(resolve_request_path("/%2e%2e/lectern.toml"), None);
    }

    #[test]
    fn test_mime_for_common_site_files() {
        assert_eq!(mime_for(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(mime_for(Path::new("styles/site.css")), "text/css; charset=utf-8");
        assert_eq!(mime_for(Path::new("documents/cv.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("images/profile.jpg")), "image/jpeg");
    }

    #[test]
    fn test_mime_for_unknown_extension_is_binary() {
        assert_eq!(mime_for(Path::new("data.bin")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("no_extension")), "application/octet-stream");
    }
}
