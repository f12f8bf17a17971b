//! Rebuild-on-change for `lectern serve`.
//!
//! Watches the config file, the data tables and the assets directory
//! through `notify`. Any real change triggers a full site rebuild: the
//! site is a handful of documents, so a full build is always cheap, and
//! unchanged outputs are skipped at write time anyway. A change to
//! `lectern.toml` additionally hot-reloads the global config first.
//!
//! Outcomes are reported through [`WatchStatus`], which repaints a
//! single status block instead of scrolling the terminal.

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::WatchStatus,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

/// Quiet period a burst of events must reach before it flushes.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Window after a successful rebuild in which new events are dropped,
/// swallowing the watcher echo of the build's own writes.
const COOLDOWN: Duration = Duration::from_millis(800);

/// Receive timeout while nothing is pending.
const IDLE_POLL: Duration = Duration::from_secs(60);

// =============================================================================
// Path Triage
// =============================================================================

/// What a changed path means for the rebuild strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileCategory {
    /// `lectern.toml` itself. Reloaded before rebuilding.
    Config,
    /// Data tables or assets. Rebuild with the current config.
    Content,
    /// Outside every watched root. Ignored.
    Unknown,
}

fn categorize_path(path: &Path, config: &SiteConfig) -> FileCategory {
    if path == config.config_path {
        FileCategory::Config
    } else if path.starts_with(&config.build.data) || path.starts_with(&config.build.assets) {
        FileCategory::Content
    } else {
        FileCategory::Unknown
    }
}

/// Editor artifacts: swap, backup and hidden files.
fn is_editor_artifact(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.starts_with('.') || name.ends_with('~') {
        return true;
    }

    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("swp" | "swo" | "tmp" | "bak" | "bck" | "backup")
    )
}

/// Paths in watch output read relative to the project root.
fn display_rel<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

// =============================================================================
// Change Buffer
// =============================================================================

/// Accumulates watcher events until they settle.
///
/// Editors save in bursts (write, rename, chmod), so changed paths
/// collect here until no new event has landed for [`DEBOUNCE`], then
/// flush as one batch.
struct ChangeBuffer {
    paths: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    cooldown_until: Option<Instant>,
}

impl ChangeBuffer {
    fn new() -> Self {
        Self {
            paths: FxHashSet::default(),
            last_event: None,
            cooldown_until: None,
        }
    }

    fn absorb(&mut self, event: Event) {
        self.paths.extend(
            event
                .paths
                .into_iter()
                .filter(|path| !is_editor_artifact(path)),
        );
        self.last_event = Some(Instant::now());
    }

    fn settled(&self) -> bool {
        !self.paths.is_empty() && self.last_event.is_some_and(|at| at.elapsed() >= DEBOUNCE)
    }

    fn flush(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.paths.drain().collect()
    }

    fn in_cooldown(&self) -> bool {
        self.cooldown_until
            .is_some_and(|until| Instant::now() < until)
    }

    fn start_cooldown(&mut self) {
        self.cooldown_until = Some(Instant::now() + COOLDOWN);
    }

    fn poll_timeout(&self) -> Duration {
        if self.paths.is_empty() {
            IDLE_POLL
        } else {
            DEBOUNCE
        }
    }
}

// =============================================================================
// Rebuild
// =============================================================================

/// React to a settled batch of changes. Returns true when a rebuild ran
/// through, so the caller can start the cooldown.
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) -> bool {
    if paths.is_empty() {
        return false;
    }

    let config = cfg();
    let root = config.get_root().to_owned();

    let mut config_changed = false;
    let mut content_changed = false;
    for path in paths {
        match categorize_path(path, &config) {
            FileCategory::Config => config_changed = true,
            FileCategory::Content => content_changed = true,
            FileCategory::Unknown => {}
        }
    }

    if config_changed {
        match reload_config() {
            Ok(true) => {}
            // Saved without content changes. Rebuild only if data or
            // assets changed too.
            Ok(false) if !content_changed => return false,
            Ok(false) => {}
            Err(err) => {
                status.error("config reload failed", &format!("{err:#}"));
                return false;
            }
        }
    } else if !content_changed {
        return false;
    }

    let trigger = paths
        .iter()
        .map(|path| display_rel(path, &root).to_string())
        .collect::<Vec<_>>()
        .join(", ");

    // cfg() again: the reload above may have swapped the config.
    match build_site(&cfg()) {
        Ok(()) => {
            status.success(&format!("rebuilt: {trigger}"));
            true
        }
        Err(err) => {
            status.error(&format!("rebuild failed ({trigger})"), &format!("{err:#}"));
            false
        }
    }
}

// =============================================================================
// Watcher Loop
// =============================================================================

fn register_watches(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let roots = [
        (config.config_path.as_path(), RecursiveMode::NonRecursive),
        (config.build.data.as_path(), RecursiveMode::Recursive),
        (config.build.assets.as_path(), RecursiveMode::Recursive),
    ];

    let project = config.get_root();
    let mut watched = Vec::new();
    for (path, mode) in roots {
        if path.exists() {
            watcher
                .watch(path, mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            watched.push(display_rel(path, project).to_string());
        }
    }

    log!("watch"; "watching: {}", watched.join(", "));
    eprintln!(); // gap before the status block starts repainting
    Ok(())
}

const fn matters(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Watch and rebuild until the event channel closes. Blocks; `serve`
/// runs it on its own thread.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    register_watches(&mut watcher, &cfg())?;

    let mut buffer = ChangeBuffer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(buffer.poll_timeout()) {
            Ok(Ok(event)) => {
                if matters(&event) && !buffer.in_cooldown() {
                    buffer.absorb(event);
                }
            }
            Ok(Err(err)) => log!("watch"; "error: {err}"),
            Err(RecvTimeoutError::Timeout) => {
                if buffer.settled() && handle_changes(&buffer.flush(), &mut status) {
                    buffer.start_cooldown();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
