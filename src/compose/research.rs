//! Research view: paper cards grouped into fixed sections.
//!
//! Sections with no papers are left out entirely, heading included.

use crate::{
    data::{Accolade, Paper, ResearchData},
    markup::Markup,
};
use anyhow::Result;

pub(super) fn render(research: &ResearchData) -> Result<String> {
    let mut m = Markup::new();
    m.elem(
        "div",
        &[("id", "research"), ("class", "page-content active")],
        |m| {
            m.text_elem("h1", &[], "Research")?;
            for (heading, papers) in research.sections() {
                if papers.is_empty() {
                    continue;
                }
                m.text_elem("h2", &[], heading)?;
                for paper in papers {
                    paper_card(m, paper)?;
                }
            }
            Ok(())
        },
    )?;
    m.into_string()
}

/// One paper card: linked title, co-authors, then the optional blocks
/// in a fixed order.
fn paper_card(m: &mut Markup, paper: &Paper) -> Result<()> {
    let anchor = paper.anchor();
    m.elem("div", &[("class", "paper-item"), ("id", &anchor)], |m| {
        paper_title(m, paper)?;
        author_line(m, paper)?;
        publication_line(m, paper)?;
        paper_links(m, paper)?;
        accolade_block(m, "awards", "Awards:", "🏆", &paper.awards)?;
        accolade_block(m, "funding-info", "Funding:", "💰", &paper.funding)?;
        media_coverage(m, paper)?;
        abstract_block(m, paper)
    })
}

/// Title, linked to the first non-mailto paper link when one exists.
fn paper_title(m: &mut Markup, paper: &Paper) -> Result<()> {
    m.elem("div", &[("class", "paper-title")], |m| {
        match paper.title_link() {
            Some(link) => m.text_elem(
                "a",
                &[("href", &link.url), ("target", "_blank")],
                &paper.title,
            ),
            None => m.text(&paper.title),
        }
    })
}

/// Co-author list prefixed with "with". The owner's own author entry
/// is filtered out; a solo paper gets no line at all.
fn author_line(m: &mut Markup, paper: &Paper) -> Result<()> {
    let co_authors: Vec<_> = paper.co_authors().collect();
    if co_authors.is_empty() {
        return Ok(());
    }
    m.elem("div", &[("class", "authors")], |m| {
        m.text("with ")?;
        for (i, author) in co_authors.iter().enumerate() {
            if i > 0 {
                m.text(", ")?;
            }
            match author.url.as_deref() {
                Some(url) => {
                    m.text_elem("a", &[("href", url), ("target", "_blank")], &author.name)?;
                }
                None => m.text(&author.name)?,
            }
        }
        Ok(())
    })
}

fn publication_line(m: &mut Markup, paper: &Paper) -> Result<()> {
    let Some(publication) = &paper.publication else {
        return Ok(());
    };
    m.elem("p", &[("class", "publication-info")], |m| {
        m.text_elem("em", &[], &publication.journal)?;
        m.text(&format!(", {}", publication.volume))
    })
}

fn paper_links(m: &mut Markup, paper: &Paper) -> Result<()> {
    if paper.links.is_empty() {
        return Ok(());
    }
    m.elem("div", &[("class", "paper-links")], |m| {
        for link in &paper.links {
            m.text_elem("a", &[("href", &link.url), ("target", "_blank")], &link.text)?;
        }
        Ok(())
    })
}

/// Awards and funding share a layout: a label followed by one badged
/// line per item.
fn accolade_block(
    m: &mut Markup,
    class: &str,
    label: &str,
    badge: &str,
    items: &[Accolade],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    m.elem("div", &[("class", class)], |m| {
        m.text_elem("strong", &[], label)?;
        for item in items {
            m.elem("p", &[], |m| {
                m.text(&format!("{badge} "))?;
                match item.url.as_deref() {
                    Some(url) => m.text_elem("a", &[("href", url), ("target", "_blank")], &item.title),
                    None => m.text(&item.title),
                }
            })?;
        }
        Ok(())
    })
}

fn media_coverage(m: &mut Markup, paper: &Paper) -> Result<()> {
    if paper.media.is_empty() {
        return Ok(());
    }
    m.elem("div", &[("class", "media-coverage")], |m| {
        m.text_elem("strong", &[], "Media coverage:")?;
        m.elem("div", &[("class", "media-links")], |m| {
            for mention in &paper.media {
                m.text_elem(
                    "a",
                    &[("href", &mention.url), ("target", "_blank")],
                    &mention.outlet,
                )?;
            }
            Ok(())
        })
    })
}

fn abstract_block(m: &mut Markup, paper: &Paper) -> Result<()> {
    match paper.r#abstract.as_deref() {
        Some(text) if !text.is_empty() => m.elem("div", &[("class", "abstract")], |m| m.text(text)),
        _ => Ok(()),
    }
}
