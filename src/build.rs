//! Site building orchestration.
//!
//! Materialises every route as a static document and copies assets.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── SiteData::load() ──► data tables from TOML
//!     │
//!     ├── compose_documents()
//!     │       │
//!     │       └── For each route: a fresh Router restores from the
//!     │           route's URL fragment against a capturing surface,
//!     │           then the shell wraps the captured state
//!     │
//!     └── rayon::join(write documents, copy assets) ──► sitemap
//! ```
//!
//! The not-found view becomes `404.html`, which both the development
//! server and common static hosts pick up for unknown paths.

use crate::{
    compose::PageComposer,
    config::{MetaTable, RouteMeta, SiteConfig},
    data::SiteData,
    log, minify,
    router::{HistoryEntry, Route, Router, Surface},
    shell,
    sitemap::build_sitemap,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

// ============================================================================
// Public API
// ============================================================================

/// Build the entire site.
///
/// Loads the data tables, drives the router across every route to
/// capture each document's state, then writes pages and copies assets
/// in parallel. If `config.build.clear` is true, the output directory
/// is removed first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = &config.build.output;

    prepare_output(output, config.build.clear)?;

    let data = SiteData::load(config)?;
    let meta = MetaTable::resolve(config);
    let documents = compose_documents(config, &data, &meta);

    let (pages_result, assets_result) = rayon::join(
        || write_documents(config, &documents),
        || copy_assets(config),
    );
    pages_result?;
    assets_result?;

    build_sitemap(config)?;

    log!("build"; "done");
    Ok(())
}

/// Write `content` unless the file already holds those exact bytes.
///
/// Keeps watch-mode rebuilds quiet and avoids needless mtime churn.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &[u8]) -> Result<bool> {
    if let Ok(existing) = fs::read(path)
        && existing == content
    {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

// ============================================================================
// Document Composition
// ============================================================================

/// One finished page: output path relative to the output directory
/// plus its document markup.
struct Document {
    path: PathBuf,
    html: String,
}

/// Surface that records the final display state of a navigation.
#[derive(Default)]
struct CaptureSurface {
    active: Option<Route>,
    content: String,
    meta: Option<RouteMeta>,
}

impl Surface for CaptureSurface {
    fn set_active_nav(&mut self, route: Route) {
        self.active = Some(route);
    }
    fn clear_active_nav(&mut self) {
        self.active = None;
    }
    fn begin_loading(&mut self) {}
    fn swap_content(&mut self, markup: &str) {
        self.content = markup.to_owned();
    }
    fn finish_loading(&mut self) {}
    fn push_history(&mut self, _entry: HistoryEntry) {}
    fn set_metadata(&mut self, meta: &RouteMeta) {
        self.meta = Some(meta.clone());
    }
}

/// Materialise every route, plus the 404 document.
///
/// Each route is entered through its own URL fragment on a fresh
/// router, so a static document always matches what fragment
/// navigation would have displayed.
fn compose_documents(config: &SiteConfig, data: &SiteData, meta: &MetaTable) -> Vec<Document> {
    let default = meta.default_route();
    let mut documents = Vec::with_capacity(Route::ALL.len() + 1);

    for route in Route::ALL {
        let composer = PageComposer::new(&config.profile, data);
        let mut router = Router::new(composer, CaptureSurface::default(), meta);
        router.restore_from_fragment(route.fragment(default));

        let surface = router.into_surface();
        let page_meta = surface
            .meta
            .unwrap_or_else(|| meta.get(route).clone());
        documents.push(Document {
            path: route.output_path(default),
            html: render_page(config, surface.active, &page_meta, &surface.content),
        });
    }

    // Unknown-route document: no nav control marked, metadata falls
    // back to the default route
    let composer = PageComposer::new(&config.profile, data);
    let mut router = Router::new(composer, CaptureSurface::default(), meta);
    router.navigate("404", true);
    let surface = router.into_surface();
    documents.push(Document {
        path: PathBuf::from("404.html"),
        html: render_page(config, None, meta.lookup("404"), &surface.content),
    });

    documents
}

/// Wrap composed content in the document shell, falling back to the
/// minimal identity page if the shell fails.
fn render_page(
    config: &SiteConfig,
    active: Option<Route>,
    meta: &RouteMeta,
    content: &str,
) -> String {
    match shell::render_document(config, active, meta, content) {
        Ok(html) => html,
        Err(err) => {
            log!("error"; "document shell failed: {err:#}");
            shell::fallback_document(&config.profile)
        }
    }
}

fn write_documents(config: &SiteConfig, documents: &[Document]) -> Result<()> {
    let output = &config.build.output;

    for document in documents {
        let dest = output.join(&document.path);
        let html = minify::html(document.html.as_bytes(), config);
        if write_if_changed(&dest, &html)? {
            log!("page"; "{}", document.path.display());
        }
    }
    Ok(())
}

// ============================================================================
// Assets
// ============================================================================

/// Copy the assets directory into the output, preserving structure.
///
/// Unchanged files (by mtime) are skipped unless a clean build was
/// requested.
fn copy_assets(config: &SiteConfig) -> Result<()> {
    let assets = &config.build.assets;
    if !assets.exists() {
        return Ok(());
    }

    collect_files(assets)
        .par_iter()
        .try_for_each(|path| copy_asset(path, assets, &config.build.output, config.build.clear))
}

fn copy_asset(path: &Path, assets: &Path, output: &Path, clean: bool) -> Result<()> {
    let rel = path.strip_prefix(assets)?;
    let dest = output.join(rel);

    if !clean && is_up_to_date(path, &dest) {
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest).with_context(|| format!("Failed to copy {}", path.display()))?;

    log!("assets"; "{}", rel.display());
    Ok(())
}

/// Collect all files from a directory recursively.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if destination is at least as new as the source.
fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let Ok(src_meta) = src.metadata() else {
        return false;
    };
    let Ok(dst_meta) = dst.metadata() else {
        return false;
    };

    match (src_meta.modified(), dst_meta.modified()) {
        (Ok(src_time), Ok(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

fn prepare_output(output: &Path, clear: bool) -> Result<()> {
    if clear && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
