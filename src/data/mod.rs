//! Content tables loaded from the data directory.
//!
//! Three TOML files feed the composed views:
//!
//! | File                | Contents                          |
//! |---------------------|-----------------------------------|
//! | `papers.toml`       | Research entries by section       |
//! | `teaching.toml`     | Course instances, intro and outro |
//! | `universities.toml` | Institution reference table       |
//!
//! A missing file yields an empty table, so the affected view renders
//! its static parts only. A malformed file fails the build with a
//! parse error pointing at the file.

mod course;
mod paper;
mod university;

pub use course::{
    CourseInstance, Level, MergedCourse, TeachingData, UniversityGroup, group_by_university,
    merge_courses,
};
pub use paper::{Accolade, Author, MediaMention, Paper, PaperLink, Publication, ResearchData};
pub use university::{University, UniversityTable};

use crate::config::SiteConfig;
use crate::log;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{fs, path::Path};

/// Everything the page composers read.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub research: ResearchData,
    pub teaching: TeachingData,
    pub universities: UniversityTable,
}

impl SiteData {
    /// Load all tables from the configured data directory.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let dir = &config.build.data;
        Ok(Self {
            research: load_table(dir, "papers.toml")?,
            teaching: load_table(dir, "teaching.toml")?,
            universities: load_table(dir, "universities.toml")?,
        })
    }
}

/// Parse one TOML table, defaulting to empty when the file is absent.
fn load_table<T: DeserializeOwned + Default>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    if !path.exists() {
        log!("data"; "{name} not found, using empty table");
        return Ok(T::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read `{}`", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse `{}`", path.display()))
}
