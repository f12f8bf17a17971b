//! `[build]` section of `lectern.toml`.
//!
//! Directory layout, HTML minification, sitemap output and the extra
//! `<head>` entries every page shares.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section.
///
/// # Example
/// ```toml
/// [build]
/// data = "data"        # TOML content tables
/// assets = "assets"    # copied verbatim into the output
/// output = "public"
/// minify = true
///
/// [build.sitemap]
/// enable = true
///
/// [build.head]
/// icon = "images/favicon.ico"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root. Normally supplied through `--root` rather than the
    /// config file.
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Where the generated site is written.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static files copied through unchanged (styles, images, PDFs).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Directory holding the content tables: `papers.toml`,
    /// `teaching.toml` and `universities.toml`.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Run emitted HTML through the minifier.
    #[serde(default = "defaults::on")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Delete the output directory before building.
    #[serde(default = "defaults::off")]
    #[educe(Default = false)]
    pub clear: bool,

    /// `[build.sitemap]` sub-section.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// `[build.head]` sub-section.
    #[serde(default)]
    pub head: HeadConfig,
}

/// `[build.sitemap]`: search engine sitemap output.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Write `sitemap.xml` as part of the build. Needs `[base] url`.
    #[serde(default = "defaults::off")]
    #[educe(Default = defaults::off())]
    pub enable: bool,

    /// File name inside the output directory. Made absolute during
    /// config loading.
    #[serde(default = "defaults::build::sitemap_path")]
    #[educe(Default = defaults::build::sitemap_path())]
    pub path: PathBuf,
}

/// `[build.head]`: entries injected into every document `<head>`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HeadConfig {
    /// Favicon, as a path under the assets directory.
    #[serde(default)]
    pub icon: Option<PathBuf>,

    /// Stylesheets linked in order, as paths under the assets directory.
    #[serde(default = "defaults::build::head_styles")]
    #[educe(Default = defaults::build::head_styles())]
    pub styles: Vec<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config: SiteConfig = toml::from_str("[build]").unwrap();

        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert_eq!(config.build.data, PathBuf::from("data"));
        assert!(config.build.minify);
        assert!(!config.build.clear);
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
        assert_eq!(config.build.head.icon, None);
        assert_eq!(
            config.build.head.styles,
            vec![PathBuf::from("styles/site.css")]
        );
    }

    #[test]
    fn test_every_build_key_overridable() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            output = "_site"
            assets = "files"
            data = "tables"
            minify = false
            clear = true

            [build.sitemap]
            enable = true
            path = "map.xml"

            [build.head]
            icon = "images/favicon.ico"
            styles = ["styles/site.css", "styles/print.css"]
        "#,
        )
        .unwrap();

        assert_eq!(config.build.output, PathBuf::from("_site"));
        assert_eq!(config.build.assets, PathBuf::from("files"));
        assert_eq!(config.build.data, PathBuf::from("tables"));
        assert!(!config.build.minify);
        assert!(config.build.clear);
        assert!(config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("map.xml"));
        assert_eq!(
            config.build.head.icon,
            Some(PathBuf::from("images/favicon.ico"))
        );
        assert_eq!(config.build.head.styles.len(), 2);
    }

    #[test]
    fn test_unknown_build_key_rejected() {
        let result: Result<SiteConfig, _> =
            toml::from_str("[build]\ntemplates = \"templates\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_sitemap_key_rejected() {
        let result: Result<SiteConfig, _> =
            toml::from_str("[build.sitemap]\nfrequency = \"weekly\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_styles_list_allowed() {
        let config: SiteConfig = toml::from_str("[build.head]\nstyles = []").unwrap();

        assert!(config.build.head.styles.is_empty());
    }
}
