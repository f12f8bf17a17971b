//! Research entry tables.
//!
//! `papers.toml` holds three lists, one per section of the research
//! view. Entries share one shape: title, co-authors, links and the
//! optional award/funding/media/abstract blocks.

use crate::slug::slugify;
use serde::Deserialize;

// ============================================================================
// Tables
// ============================================================================

/// Contents of `papers.toml`, one list per page section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResearchData {
    /// `[[working_papers]]` entries
    #[serde(default)]
    pub working_papers: Vec<Paper>,

    /// `[[in_progress]]` entries
    #[serde(default)]
    pub in_progress: Vec<Paper>,

    /// `[[earlier_work]]` entries
    #[serde(default)]
    pub earlier_work: Vec<Paper>,
}

impl ResearchData {
    /// Sections in display order with their headings.
    pub fn sections(&self) -> [(&'static str, &[Paper]); 3] {
        [
            ("Working papers", &self.working_papers),
            ("Work in progress", &self.in_progress),
            ("Earlier work", &self.earlier_work),
        ]
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One research entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Paper {
    /// Stable identifier, used for the entry anchor.
    pub id: String,

    pub title: String,

    /// Full author list, owner included. The owner marks their own
    /// entry with `is_me` and is excluded from the co-author line.
    #[serde(default)]
    pub authors: Vec<Author>,

    /// Draft, slides and similar links shown under the entry.
    #[serde(default)]
    pub links: Vec<PaperLink>,

    #[serde(default)]
    pub awards: Vec<Accolade>,

    #[serde(default)]
    pub funding: Vec<Accolade>,

    #[serde(default)]
    pub media: Vec<MediaMention>,

    /// Journal reference once published.
    #[serde(default)]
    pub publication: Option<Publication>,

    #[serde(default)]
    pub r#abstract: Option<String>,
}

impl Paper {
    /// Anchor id for the entry element.
    pub fn anchor(&self) -> String {
        format!("paper-{}", slugify(&self.id))
    }

    /// Link the title points at: the first one that is not a mailto.
    pub fn title_link(&self) -> Option<&PaperLink> {
        self.links.iter().find(|link| !link.url.contains("mailto:"))
    }

    /// Authors other than the owner, in stored order.
    pub fn co_authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter().filter(|author| !author.is_me)
    }
}

/// One author, optionally linked to their homepage.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    /// Marks the site owner's own entry.
    #[serde(default)]
    pub is_me: bool,
}

/// One link under a research entry (draft, slides, appendix, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaperLink {
    pub text: String,
    pub url: String,
}

/// An award or a grant attached to an entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Accolade {
    pub title: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Press coverage of an entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaMention {
    pub outlet: String,
    pub url: String,
}

/// Journal reference for a published entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    pub journal: String,

    #[serde(default)]
    pub volume: String,
}

// ============================================================================
// Tests
// ============================================================================
