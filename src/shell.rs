//! Document shell: the fixed frame around composed route content.
//!
//! Wraps one view in a full HTML document - head metadata, site header
//! with the navigation controls, content container, footer. When the
//! shell itself cannot be built, [`fallback_document`] produces a
//! minimal identity-and-contact page so the output is never blank.

use crate::{
    config::{ProfileConfig, RouteMeta, SiteConfig},
    markup::Markup,
    router::Route,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use quick_xml::escape::escape;

// ============================================================================
// Document
// ============================================================================

/// Render the full document for one route.
///
/// `active` is the route whose nav control is marked; the 404 document
/// passes `None`.
pub fn render_document(
    config: &SiteConfig,
    active: Option<Route>,
    meta: &RouteMeta,
    content: &str,
) -> Result<String> {
    let mut m = Markup::new();
    m.doctype("html")?;
    m.elem("html", &[("lang", &config.base.language)], |m| {
        head(m, config, meta)?;
        m.elem("body", &[], |m| {
            header(m, config, active)?;
            m.elem(
                "main",
                &[("id", "page-content"), ("class", "container")],
                |m| m.raw(content),
            )?;
            footer(m, config)
        })
    })?;
    m.into_string()
}

fn head(m: &mut Markup, config: &SiteConfig, meta: &RouteMeta) -> Result<()> {
    m.elem("head", &[], |m| {
        m.leaf("meta", &[("charset", "utf-8")])?;
        m.leaf(
            "meta",
            &[
                ("name", "viewport"),
                ("content", "width=device-width, initial-scale=1"),
            ],
        )?;
        m.text_elem("title", &[], &meta.title)?;
        m.leaf("meta", &[("name", "description"), ("content", &meta.description)])?;

        if let Some(icon) = &config.build.head.icon {
            let href = format!("/{}", icon.display());
            m.leaf("link", &[("rel", "icon"), ("href", &href)])?;
        }
        for style in &config.build.head.styles {
            let href = format!("/{}", style.display());
            m.leaf("link", &[("rel", "stylesheet"), ("href", &href)])?;
        }
        Ok(())
    })
}

fn header(m: &mut Markup, config: &SiteConfig, active: Option<Route>) -> Result<()> {
    let default = config.base.default_route;
    m.elem("header", &[("class", "site-header")], |m| {
        m.elem("div", &[("class", "container")], |m| {
            m.text_elem(
                "a",
                &[("class", "brand"), ("href", "/")],
                &config.profile.name,
            )?;
            m.elem("nav", &[("class", "site-nav")], |m| {
                for route in Route::ALL {
                    let class = if active == Some(route) {
                        "nav-link active"
                    } else {
                        "nav-link"
                    };
                    let href = route.href(default);
                    m.text_elem(
                        "a",
                        &[
                            ("class", class),
                            ("data-route", route.name()),
                            ("href", &href),
                        ],
                        route.label(),
                    )?;
                }
                Ok(())
            })
        })
    })
}

fn footer(m: &mut Markup, config: &SiteConfig) -> Result<()> {
    let notice = if config.base.copyright.is_empty() {
        format!("© {} {}", Local::now().year(), config.profile.name)
    } else {
        format!("© {}", config.base.copyright)
    };
    m.elem("footer", &[("class", "site-footer")], |m| {
        m.elem("div", &[("class", "container")], |m| {
            m.text_elem("p", &[], &notice)
        })
    })
}

// ============================================================================
// Fallback
// ============================================================================

/// Minimal static document carrying only identity and contact details.
///
/// Built with plain string formatting so it has no failure path of its
/// own; used when [`render_document`] fails.
pub fn fallback_document(profile: &ProfileConfig) -> String {
    let name = escape(&profile.name);
    let email = escape(&profile.email);

    let mut identity = String::new();
    if !profile.position.is_empty() {
        identity.push_str("<p>");
        identity.push_str(&escape(&profile.position));
        if !profile.institution.is_empty() {
            identity.push_str(" at ");
            identity.push_str(&escape(&profile.institution));
        }
        identity.push_str("</p>");
    }

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"/><title>{name}</title></head>\
         <body><div class=\"error-fallback\"><h1>{name}</h1>{identity}\
         <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p></div></body></html>"
    )
}

// ============================================================================
// Tests
// ============================================================================
