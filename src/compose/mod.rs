//! Page composition.
//!
//! One function per route maps the profile and the data tables to the
//! full markup of that view; [`PageComposer`] is the [`Compose`] impl
//! the router drives. Composition is pure: the same config and data
//! always produce the same markup, and nothing here touches the
//! filesystem.
//!
//! | View                    | File          |
//! |-------------------------|---------------|
//! | profile and contact     | `home.rs`     |
//! | papers by section       | `research.rs` |
//! | courses by university   | `teaching.rs` |
//! | embedded vitae document | `cv.rs`       |

mod cv;
mod home;
mod research;
mod teaching;

use crate::{
    config::ProfileConfig,
    data::SiteData,
    markup::Markup,
    router::{Compose, Route},
};
use anyhow::Result;

/// Last resort when even the not-found view fails to build.
const FALLBACK_VIEW: &str = "<div class=\"error-page\"><h1>Page Not Found</h1></div>";

// ============================================================================
// PageComposer
// ============================================================================

/// Renders one view per route from the profile and the data tables.
pub struct PageComposer<'a> {
    profile: &'a ProfileConfig,
    data: &'a SiteData,
}

impl<'a> PageComposer<'a> {
    pub fn new(profile: &'a ProfileConfig, data: &'a SiteData) -> Self {
        Self { profile, data }
    }
}

impl Compose for PageComposer<'_> {
    fn compose(&self, route: Route) -> Result<String> {
        match route {
            Route::Home => home::render(self.profile),
            Route::Research => research::render(&self.data.research),
            Route::Teaching => teaching::render(&self.data.teaching, &self.data.universities),
            Route::Cv => cv::render(self.profile),
        }
    }

    fn not_found(&self) -> String {
        render_not_found().unwrap_or_else(|_| FALLBACK_VIEW.to_owned())
    }
}

/// Not-found view shared by the router error path and the 404 page.
fn render_not_found() -> Result<String> {
    let mut m = Markup::new();
    m.elem("div", &[("class", "error-page")], |m| {
        m.text_elem("h1", &[], "Page Not Found")?;
        m.text_elem("p", &[], "Sorry, the page you're looking for doesn't exist.")?;
        m.elem("p", &[], |m| {
            m.text_elem("a", &[("href", "/"), ("class", "btn btn-primary")], "Go Home")
        })
    })?;
    m.into_string()
}
