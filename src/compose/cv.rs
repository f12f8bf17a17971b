//! Vitae view: the CV document embedded in a viewer frame.

use crate::{config::ProfileConfig, markup::Markup};
use anyhow::Result;

pub(super) fn render(profile: &ProfileConfig) -> Result<String> {
    let src = format!("/{}", profile.cv_document);

    let mut m = Markup::new();
    m.elem("div", &[("id", "cv"), ("class", "page-content active")], |m| {
        m.text_elem("h1", &[], "Vitae")?;
        m.elem("div", &[("class", "cv-container")], |m| {
            m.elem("div", &[("class", "cv-viewer"), ("id", "pdfViewer")], |m| {
                m.elem("iframe", &[("id", "pdfIframe"), ("src", &src)], |_| Ok(()))
            })
        })
    })?;
    m.into_string()
}
