//! Route table and navigation state machine.
//!
//! The routes of the site are a closed set (home, research, teaching,
//! cv) and all navigation flows through [`Router::navigate`]. The
//! router owns the rules - same-route no-ops, unknown names, history
//! pushes, metadata updates - and drives a [`Surface`] that carries
//! them out on the host. The build pipeline plugs in a surface that
//! captures the final document state for each route; tests plug in a
//! recording fake.
//!
//! # Architecture
//!
//! ```text
//!                 navigate(name, is_history_replay)
//!                               │
//!                               ▼
//!                    ┌─────────────────────┐
//!           ┌────────│  Route::from_name   │────────┐
//!           │ Ok     └─────────────────────┘  Err   │
//!           ▼                                       ▼
//!   same route? ── yes ──► no-op            not-found view,
//!           │ no                            current unchanged
//!           ▼
//!   nav + loading ─► compose ── Err ──► not-found view
//!           │ Ok
//!           ▼
//!   swap content ─► history (unless replay) ─► metadata
//! ```
//!
//! The URL fragment protocol is part of the route table: the default
//! route maps to an empty fragment, every other route to its name, and
//! [`Route::resolve_fragment`] inverts the mapping.

use crate::config::{MetaTable, RouteMeta};
use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Routes
// ============================================================================

/// One view of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Research,
    Teaching,
    Cv,
}

impl Route {
    /// Every route in navigation order.
    pub const ALL: [Route; 4] = [Route::Home, Route::Research, Route::Teaching, Route::Cv];

    /// Route name as it appears in URL fragments.
    pub const fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Research => "research",
            Route::Teaching => "teaching",
            Route::Cv => "cv",
        }
    }

    /// Text of the navigation control.
    pub const fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Research => "Research",
            Route::Teaching => "Teaching",
            Route::Cv => "Vitae",
        }
    }

    /// Position in [`Route::ALL`], used for table indexing.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Result<Self, RouteParseError> {
        match name {
            "home" => Ok(Route::Home),
            "research" => Ok(Route::Research),
            "teaching" => Ok(Route::Teaching),
            "cv" => Ok(Route::Cv),
            _ => Err(RouteParseError(name.to_owned())),
        }
    }

    /// Resolve a URL fragment: empty means the default route.
    pub fn resolve_fragment(fragment: &str, default: Route) -> Result<Self, RouteParseError> {
        if fragment.is_empty() {
            Ok(default)
        } else {
            Self::from_name(fragment)
        }
    }

    /// Fragment for this route: empty for the default route.
    pub fn fragment(self, default: Route) -> &'static str {
        if self == default { "" } else { self.name() }
    }

    /// Path the route is served from.
    pub fn href(self, default: Route) -> String {
        if self == default {
            "/".to_owned()
        } else {
            format!("/{}/", self.name())
        }
    }

    /// Output document path, relative to the output directory.
    pub fn output_path(self, default: Route) -> PathBuf {
        if self == default {
            PathBuf::from("index.html")
        } else {
            Path::new(self.name()).join("index.html")
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Name that matches no route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route `{0}`")]
pub struct RouteParseError(pub String);

// ============================================================================
// History
// ============================================================================

/// One entry recorded in the navigation history.
///
/// The build's capturing surface discards entries (a static document
/// replays history instead of recording it), so only interactive
/// surfaces read the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    #[allow(dead_code)]
    pub route: Route,

    /// Address of the entry: bare path for the default route,
    /// `/#<route>` otherwise.
    #[allow(dead_code)]
    pub url: String,
}

impl HistoryEntry {
    fn new(route: Route, default: Route) -> Self {
        let fragment = route.fragment(default);
        let url = if fragment.is_empty() {
            "/".to_owned()
        } else {
            format!("/#{fragment}")
        };
        Self { route, url }
    }
}

// ============================================================================
// Seams
// ============================================================================

/// Host-side display driven by the router.
pub trait Surface {
    /// Mark one navigation control active and all others inactive.
    fn set_active_nav(&mut self, route: Route);

    /// Remove the active mark from every navigation control.
    fn clear_active_nav(&mut self);

    /// Show the loading indicator.
    fn begin_loading(&mut self);

    /// Replace the content container with new markup.
    fn swap_content(&mut self, markup: &str);

    /// Hide the loading indicator.
    fn finish_loading(&mut self);

    /// Record a navigation history entry.
    fn push_history(&mut self, entry: HistoryEntry);

    /// Set the document title and description.
    fn set_metadata(&mut self, meta: &RouteMeta);
}

/// Source of view markup, one fragment per route.
pub trait Compose {
    /// Render the view for a route.
    fn compose(&self, route: Route) -> Result<String>;

    /// Render the not-found view.
    fn not_found(&self) -> String;
}

// ============================================================================
// Router
// ============================================================================

/// What the router believes is on display.
#[derive(Debug, Clone, Default)]
struct NavigationState {
    current: Option<Route>,
    /// Markup last swapped into the surface.
    #[allow(dead_code)] // the surface holds the live copy
    displayed: String,
}

/// Navigation state machine over a composer and a surface.
pub struct Router<'a, C: Compose, S: Surface> {
    composer: C,
    surface: S,
    meta: &'a MetaTable,
    default_route: Route,
    state: NavigationState,
}

impl<'a, C: Compose, S: Surface> Router<'a, C, S> {
    pub fn new(composer: C, surface: S, meta: &'a MetaTable) -> Self {
        Self {
            composer,
            surface,
            meta,
            default_route: meta.default_route(),
            state: NavigationState::default(),
        }
    }

    /// Navigate by route name, as taken from a nav control or a URL
    /// fragment.
    ///
    /// Unknown names render the not-found view and leave the current
    /// route untouched.
    pub fn navigate(&mut self, name: &str, is_history_replay: bool) {
        match Route::from_name(name) {
            Ok(route) => self.navigate_route(route, is_history_replay),
            Err(err) => {
                log!("router"; "{err}");
                self.show_unknown_route();
            }
        }
    }

    /// Navigate to a known route.
    ///
    /// Navigating to the current route is a no-op: no render, no
    /// history entry. A history replay re-renders without pushing a
    /// new entry.
    pub fn navigate_route(&mut self, route: Route, is_history_replay: bool) {
        if self.state.current == Some(route) {
            return;
        }

        self.surface.set_active_nav(route);
        self.surface.begin_loading();

        match self.composer.compose(route) {
            Ok(markup) => {
                self.surface.swap_content(&markup);
                self.surface.finish_loading();

                if !is_history_replay {
                    self.surface
                        .push_history(HistoryEntry::new(route, self.default_route));
                }
                self.surface.set_metadata(self.meta.get(route));

                self.state.current = Some(route);
                self.state.displayed = markup;
            }
            Err(err) => {
                log!("error"; "composing `{route}` failed: {err:#}");
                // Attempted nav control stays marked; route state and
                // metadata keep their pre-navigation values.
                self.show_not_found();
            }
        }
    }

    /// Re-enter navigation from a URL fragment, as on startup.
    /// An empty fragment resolves to the default route.
    pub fn restore_from_fragment(&mut self, fragment: &str) {
        match Route::resolve_fragment(fragment, self.default_route) {
            Ok(route) => self.navigate_route(route, true),
            Err(err) => {
                log!("router"; "{err}");
                self.show_unknown_route();
            }
        }
    }

    /// Full not-found sequence for names outside the route table.
    fn show_unknown_route(&mut self) {
        self.surface.begin_loading();
        self.surface.clear_active_nav();
        self.show_not_found();
    }

    /// Swap in the not-found view. Assumes loading has begun.
    fn show_not_found(&mut self) {
        let markup = self.composer.not_found();
        self.surface.swap_content(&markup);
        self.surface.finish_loading();
        self.state.displayed = markup;
    }

    /// Hand the surface back once navigation is done with it.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    // ------------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct RecordingSurface {
        active: Option<Route>,
        cleared: usize,
        swaps: Vec<String>,
        begin_count: usize,
        finish_count: usize,
        history: Vec<HistoryEntry>,
        metadata: Vec<RouteMeta>,
    }

    impl Surface for RecordingSurface {
        fn set_active_nav(&mut self, route: Route) {
            self.active = Some(route);
        }
        fn clear_active_nav(&mut self) {
            self.active = None;
            self.cleared += 1;
        }
        fn begin_loading(&mut self) {
            self.begin_count += 1;
        }
        fn swap_content(&mut self, markup: &str) {
            self.swaps.push(markup.to_owned());
        }
        fn finish_loading(&mut self) {
            self.finish_count += 1;
        }
        fn push_history(&mut self, entry: HistoryEntry) {
            self.history.push(entry);
        }
        fn set_metadata(&mut self, meta: &RouteMeta) {
            self.metadata.push(meta.clone());
        }
    }

    struct StubComposer;

    impl Compose for StubComposer {
        fn compose(&self, route: Route) -> Result<String> {
            Ok(format!("<div id=\"{route}\" class=\"page-content active\"></div>"))
        }
        fn not_found(&self) -> String {
            "<div class=\"error-page\"></div>".to_owned()
        }
    }

    struct FailingComposer;

    impl Compose for FailingComposer {
        fn compose(&self, _route: Route) -> Result<String> {
            anyhow::bail!("composer exploded")
        }
        fn not_found(&self) -> String {
            "<div class=\"error-page\"></div>".to_owned()
        }
    }

    /// Fails for research only, so a router can reach a good state
    /// first and then hit a composing error.
    struct FlakyComposer;

    impl Compose for FlakyComposer {
        fn compose(&self, route: Route) -> Result<String> {
            if route == Route::Research {
                anyhow::bail!("research backend down")
            }
            StubComposer.compose(route)
        }
        fn not_found(&self) -> String {
            StubComposer.not_found()
        }
    }

    fn meta_table() -> MetaTable {
        let config = SiteConfig::from_str("[profile]\nname = \"Test\"").unwrap();
        MetaTable::resolve(&config)
    }

    fn meta_table_with_default(route: &str) -> MetaTable {
        let config = SiteConfig::from_str(&format!(
            "[base]\ndefault_route = \"{route}\"\n\n[profile]\nname = \"Test\""
        ))
        .unwrap();
        MetaTable::resolve(&config)
    }

    // ------------------------------------------------------------------------
    // Route table tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_route_names_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_name(route.name()), Ok(route));
        }
    }

    #[test]
    fn test_route_from_unknown_name() {
        let err = Route::from_name("blog").unwrap_err();
        assert_eq!(err, RouteParseError("blog".into()));
        assert_eq!(err.to_string(), "unknown route `blog`");
    }

    #[test]
    fn test_fragment_empty_for_default_route() {
        assert_eq!(Route::Home.fragment(Route::Home), "");
        assert_eq!(Route::Research.fragment(Route::Home), "research");
        assert_eq!(Route::Home.fragment(Route::Research), "home");
    }

    #[test]
    fn test_resolve_fragment() {
        assert_eq!(Route::resolve_fragment("", Route::Home), Ok(Route::Home));
        assert_eq!(
            Route::resolve_fragment("", Route::Research),
            Ok(Route::Research)
        );
        assert_eq!(Route::resolve_fragment("cv", Route::Home), Ok(Route::Cv));
        assert!(Route::resolve_fragment("nope", Route::Home).is_err());
    }

    #[test]
    fn test_hrefs_and_output_paths() {
        assert_eq!(Route::Home.href(Route::Home), "/");
        assert_eq!(Route::Teaching.href(Route::Home), "/teaching/");
        assert_eq!(
            Route::Home.output_path(Route::Home),
            PathBuf::from("index.html")
        );
        assert_eq!(
            Route::Cv.output_path(Route::Home),
            PathBuf::from("cv/index.html")
        );
        // A configured non-home default swaps the root document
        assert_eq!(
            Route::Research.output_path(Route::Research),
            PathBuf::from("index.html")
        );
        assert_eq!(
            Route::Home.output_path(Route::Research),
            PathBuf::from("home/index.html")
        );
    }

    #[test]
    fn test_route_deserializes_lowercase() {
        let route: Route = toml::Value::String("cv".into()).try_into().unwrap();
        assert_eq!(route, Route::Cv);
    }

    // ------------------------------------------------------------------------
    // Navigation tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_navigate_renders_and_pushes_history() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("research", false);

        let surface = &router.surface;
        assert_eq!(surface.active, Some(Route::Research));
        assert_eq!(surface.begin_count, 1);
        assert_eq!(surface.finish_count, 1);
        assert_eq!(surface.swaps.len(), 1);
        assert!(surface.swaps[0].contains("id=\"research\""));
        assert_eq!(
            surface.history,
            vec![HistoryEntry {
                route: Route::Research,
                url: "/#research".into()
            }]
        );
        assert_eq!(router.state.current, Some(Route::Research));
    }

    #[test]
    fn test_navigate_default_route_url_has_no_fragment() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("home", false);

        assert_eq!(router.surface.history[0].url, "/");
    }

    #[test]
    fn test_navigate_same_route_is_noop() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("teaching", false);
        router.navigate("teaching", false);

        let surface = &router.surface;
        assert_eq!(surface.swaps.len(), 1);
        assert_eq!(surface.history.len(), 1);
        assert_eq!(surface.metadata.len(), 1);
    }

    #[test]
    fn test_navigate_sets_metadata_per_route() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("research", false);
        router.navigate("teaching", false);

        let titles: Vec<&str> = router
            .surface
            .metadata
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Research - Test", "Teaching - Test"]);
    }

    #[test]
    fn test_navigate_unknown_route_keeps_current() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("research", false);
        router.navigate("publications", false);

        assert_eq!(router.state.current, Some(Route::Research));
        assert!(router.state.displayed.contains("error-page"));

        let surface = &router.surface;
        // No extra history entry or metadata update for the bad name
        assert_eq!(surface.history.len(), 1);
        assert_eq!(surface.metadata.len(), 1);
        assert_eq!(surface.cleared, 1);
        assert_eq!(surface.active, None);
        assert_eq!(surface.begin_count, surface.finish_count);
    }

    #[test]
    fn test_navigate_unknown_route_from_fresh_router() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("publications", false);

        assert_eq!(router.state.current, None);
        assert!(router.state.displayed.contains("error-page"));
    }

    #[test]
    fn test_history_replay_does_not_push() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("cv", true);

        let surface = &router.surface;
        assert!(surface.history.is_empty());
        assert_eq!(surface.metadata.len(), 1);
        assert_eq!(router.state.current, Some(Route::Cv));
    }

    #[test]
    fn test_compose_failure_shows_error_view() {
        let meta = meta_table();
        let mut router = Router::new(FailingComposer, RecordingSurface::default(), &meta);

        router.navigate("research", false);

        assert_eq!(router.state.current, None);
        assert!(router.state.displayed.contains("error-page"));

        let surface = &router.surface;
        assert!(surface.history.is_empty());
        assert!(surface.metadata.is_empty());
        // The attempted nav control stays marked
        assert_eq!(surface.active, Some(Route::Research));
        assert_eq!(surface.begin_count, 1);
        assert_eq!(surface.finish_count, 1);
    }

    #[test]
    fn test_compose_failure_keeps_previous_route() {
        let meta = meta_table();
        let mut router = Router::new(FlakyComposer, RecordingSurface::default(), &meta);

        router.navigate("home", false);
        router.navigate("research", false);

        assert_eq!(router.state.current, Some(Route::Home));
        assert!(router.state.displayed.contains("error-page"));
        assert_eq!(router.surface.history.len(), 1);
    }

    #[test]
    fn test_fragment_round_trip() {
        let meta = meta_table();

        for route in Route::ALL {
            let mut source = Router::new(StubComposer, RecordingSurface::default(), &meta);
            source.navigate_route(route, false);
            let url = &source.surface.history[0].url;
            let fragment = url.split_once('#').map(|(_, f)| f).unwrap_or("");

            let mut restored = Router::new(StubComposer, RecordingSurface::default(), &meta);
            restored.restore_from_fragment(fragment);

            assert_eq!(restored.state.current, Some(route));
        }
    }

    #[test]
    fn test_restore_empty_fragment_resolves_default() {
        let meta = meta_table_with_default("research");
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.restore_from_fragment("");

        assert_eq!(router.state.current, Some(Route::Research));
        // Startup restore is a replay: nothing pushed
        assert!(router.surface.history.is_empty());
    }

    #[test]
    fn test_restore_unknown_fragment_shows_not_found() {
        let meta = meta_table();
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.restore_from_fragment("garbage");

        assert_eq!(router.state.current, None);
        assert!(router.state.displayed.contains("error-page"));
    }

    #[test]
    fn test_configured_default_route_changes_urls() {
        let meta = meta_table_with_default("research");
        let mut router = Router::new(StubComposer, RecordingSurface::default(), &meta);

        router.navigate("research", false);
        router.navigate("home", false);

        let urls: Vec<&str> = router
            .surface
            .history
            .iter()
            .map(|e| e.url.as_str())
            .collect();
        assert_eq!(urls, vec!["/", "/#home"]);
    }
}
