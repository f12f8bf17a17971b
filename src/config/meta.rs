//! `[meta]` section configuration and the resolved metadata table.
//!
//! Each route gets a document title and description. The `[meta.<route>]`
//! tables override the defaults, which are derived from `[profile]`, so a
//! site with a filled-in profile needs no `[meta]` section at all.
//!
//! Lookups by route name fall back to the default route's entry, so an
//! unknown name never produces an untitled document.

use super::{ProfileConfig, SiteConfig};
use crate::router::Route;
use serde::{Deserialize, Serialize};

// ============================================================================
// Config Section
// ============================================================================

/// `[meta]` section in lectern.toml - per-route metadata overrides.
///
/// # Example
/// ```toml
/// [meta.home]
/// title = "Chiara Bernardi"
/// description = "Personal academic homepage of Chiara Bernardi"
///
/// [meta.research]
/// title = "Papers - Chiara Bernardi"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaConfig {
    #[serde(default)]
    pub home: MetaEntry,

    #[serde(default)]
    pub research: MetaEntry,

    #[serde(default)]
    pub teaching: MetaEntry,

    #[serde(default)]
    pub cv: MetaEntry,
}

/// One `[meta.<route>]` table. Unset fields use profile-derived defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaEntry {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl MetaConfig {
    fn entry(&self, route: Route) -> &MetaEntry {
        match route {
            Route::Home => &self.home,
            Route::Research => &self.research,
            Route::Teaching => &self.teaching,
            Route::Cv => &self.cv,
        }
    }
}

// ============================================================================
// Resolved Table
// ============================================================================

/// Document metadata for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
    pub description: String,
}

/// Resolved metadata for every route, with default-route fallback.
#[derive(Debug, Clone)]
pub struct MetaTable {
    default_route: Route,
    entries: [RouteMeta; Route::ALL.len()],
}

impl MetaTable {
    /// Merge `[meta]` overrides with profile-derived defaults.
    pub fn resolve(config: &SiteConfig) -> Self {
        let profile = &config.profile;
        let entries = Route::ALL.map(|route| {
            let entry = config.meta.entry(route);
            RouteMeta {
                title: entry
                    .title
                    .clone()
                    .unwrap_or_else(|| default_title(route, profile)),
                description: entry
                    .description
                    .clone()
                    .unwrap_or_else(|| default_description(route, profile)),
            }
        });

        Self {
            default_route: config.base.default_route,
            entries,
        }
    }

    /// Metadata for a known route.
    pub fn get(&self, route: Route) -> &RouteMeta {
        &self.entries[route.index()]
    }

    /// Metadata by route name. Unknown names resolve to the default
    /// route's entry.
    pub fn lookup(&self, name: &str) -> &RouteMeta {
        let route = Route::from_name(name).unwrap_or(self.default_route);
        self.get(route)
    }

    pub fn default_route(&self) -> Route {
        self.default_route
    }
}

// ============================================================================
// Derived Defaults
// ============================================================================

fn default_title(route: Route, profile: &ProfileConfig) -> String {
    match route {
        Route::Home => home_title(profile),
        Route::Research => format!("Research - {}", profile.name),
        Route::Teaching => format!("Teaching - {}", profile.name),
        Route::Cv => format!("Vitae - {}", profile.name),
    }
}

fn default_description(route: Route, profile: &ProfileConfig) -> String {
    match route {
        Route::Home => {
            let title = home_title(profile);
            if profile.interests.is_empty() {
                title
            } else {
                format!("{title}, specializing in {}.", list_sentence(&profile.interests))
            }
        }
        Route::Research => format!(
            "Research by {} - working papers and work in progress.",
            profile.name
        ),
        Route::Teaching => format!("Courses taught by {}.", profile.name),
        Route::Cv => format!("Curriculum vitae of {}.", profile.name),
    }
}

fn home_title(profile: &ProfileConfig) -> String {
    if profile.position.is_empty() || profile.institution.is_empty() {
        return profile.name.clone();
    }
    if profile.department.is_empty() {
        format!(
            "{} - {} at {}",
            profile.name, profile.position, profile.institution
        )
    } else {
        format!(
            "{} - {} at the {}, {}",
            profile.name, profile.position, profile.department, profile.institution
        )
    }
}

/// Join items into prose: "a", "a and b", "a, b and c".
fn list_sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

// ============================================================================
// Tests
// ============================================================================
