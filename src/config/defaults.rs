//! Serde default functions for the config sections.
//!
//! Grouped by section so the `#[serde(default = "...")]` paths read like
//! the TOML keys they back, e.g. `defaults::serve::port`.

/// Shared default for switches that ship enabled.
pub fn on() -> bool {
    true
}

/// Shared default for switches that ship disabled.
pub fn off() -> bool {
    false
}

pub mod base {
    use crate::router::Route;

    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en-GB".into()
    }

    pub fn default_route() -> Route {
        Route::Home
    }
}

pub mod profile {
    pub fn photo() -> String {
        "images/profile.jpg".into()
    }

    pub fn cv_document() -> String {
        "documents/cv.pdf".into()
    }
}

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn sitemap_path() -> PathBuf {
        "sitemap.xml".into()
    }

    pub fn head_styles() -> Vec<PathBuf> {
        vec!["styles/site.css".into()]
    }
}

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4812
    }
}
