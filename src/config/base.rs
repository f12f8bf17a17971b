//! `[base]` section of `lectern.toml`.
//!
//! Site-wide knobs that are not about the site owner: canonical URL,
//! which route answers at the site root, language and footer copyright.

use super::defaults;
use crate::router::Route;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section.
///
/// # Example
/// ```toml
/// [base]
/// url = "https://jdoe.example.edu"
/// default_route = "home"
/// language = "en-GB"
/// copyright = "2026 J. Doe"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Canonical site URL. Absolute sitemap locations are built from it,
    /// so `[build.sitemap] enable = true` refuses to run without one.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Route the bare site root serves. That route's history URL carries
    /// no fragment; every other route shows up as `#<name>`.
    #[serde(default = "defaults::base::default_route")]
    #[educe(Default = defaults::base::default_route())]
    pub default_route: Route,

    /// BCP 47 language tag for the `<html lang>` attribute.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Footer copyright line. Left out of the page when empty.
    #[serde(default)]
    pub copyright: String,
}
