//! Output minification for HTML pages and the sitemap.
//!
//! Both entry points check `[build] minify` themselves and hand the input
//! back as `Cow::Borrowed` when it is off, so callers write whatever comes
//! back without branching.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered HTML document via the `minify-html` crate.
///
/// Closing tags and the `<html>`/`<head>` opening tags are kept so the
/// output still parses under strict tooling.
pub fn html<'a>(bytes: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(bytes);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;

    Cow::Owned(minify_html::minify(bytes, &cfg))
}

/// Collapse pretty-printed XML onto a single line.
///
/// Line-oriented on purpose: the sitemap writer indents with whole lines
/// and never puts significant whitespace inside a tag, so trimming each
/// line and dropping the blanks is lossless here.
pub fn xml<'a>(bytes: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify {
        return Cow::Borrowed(bytes);
    }

    let text = std::str::from_utf8(bytes).unwrap_or_default();
    let flat: String = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Cow::Owned(flat.into_bytes())
}

// ============================================================================
// Tests
// ============================================================================
