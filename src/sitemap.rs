//! `sitemap.xml` for the built site.
//!
//! Four routes make for a short sitemap, but crawlers still ask for one,
//! and the `<lastmod>` stamp tells them when the site last changed.
//! Entries follow the sitemaps.org 0.9 schema, one `<url>` per route,
//! absolute against `[base].url`.

use crate::{build::write_if_changed, config::SiteConfig, log, minify, router::Route};
use anyhow::Result;
use chrono::Utc;
use quick_xml::escape::escape;

const SCHEMA: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render and write the sitemap when `[build.sitemap]` is enabled.
///
/// Needs `[base].url` for absolute locations; config validation
/// guarantees it is present when the sitemap is enabled.
pub fn build_sitemap(config: &SiteConfig) -> Result<()> {
    if !config.build.sitemap.enable {
        return Ok(());
    }
    let Some(base) = config.base.url.as_deref() else {
        return Ok(());
    };

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let xml = render(&locations(base, config.base.default_route), &today);
    let xml = minify::xml(xml.as_bytes(), config);

    let path = &config.build.sitemap.path;
    if write_if_changed(path, &xml)? {
        log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    }
    Ok(())
}

/// One absolute URL per route. The default route owns the bare base
/// URL, so it appears as `/` and never under its own name.
fn locations(base: &str, default: Route) -> Vec<String> {
    let base = base.trim_end_matches('/');

    Route::ALL
        .iter()
        .map(|route| format!("{base}{}", route.href(default)))
        .collect()
}

fn render(locations: &[String], stamped: &str) -> String {
    let head = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{SCHEMA}\">\n");

    let body: String = locations
        .iter()
        .map(|loc| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{stamped}</lastmod>\n  </url>\n",
                escape(loc.as_str())
            )
        })
        .collect();

    format!("{head}{body}</urlset>\n")
}
