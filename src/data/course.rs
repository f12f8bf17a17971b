//! Teaching tables: course instances, merging and grouping.
//!
//! `teaching.toml` lists one entry per course per year. The teaching
//! view never shows raw instances: repeats of the same course collapse
//! into a single card carrying every year it ran, and cards are grouped
//! under their university with the most recently active university
//! first.

use crate::slug::slugify;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

// ============================================================================
// Tables
// ============================================================================

/// Contents of `teaching.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeachingData {
    /// Paragraph above the course list. Trusted markup.
    #[serde(default)]
    pub intro: Option<String>,

    /// Paragraph below the course list. Trusted markup.
    #[serde(default)]
    pub outro: Option<String>,

    /// `[[courses]]` entries, one per course per year.
    #[serde(default)]
    pub courses: Vec<CourseInstance>,
}

/// One year of one course at one university.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseInstance {
    pub name: String,
    pub university: String,
    pub year: u16,
    pub level: Level,
}

// ============================================================================
// Levels
// ============================================================================

/// Course level shown as a badge on each card.
///
/// Parsed case-insensitively; values outside the known set are kept
/// verbatim and styled with the catch-all badge class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Undergraduate,
    Master,
    Phd,
    SummerSchool,
    Other(String),
}

impl Level {
    fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "undergraduate" => Self::Undergraduate,
            "master" => Self::Master,
            "phd" => Self::Phd,
            "summer school" => Self::SummerSchool,
            _ => Self::Other(raw.to_owned()),
        }
    }

    /// CSS class suffix for the level badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Undergraduate => "undergraduate",
            Self::Master => "master",
            Self::Phd => "phd",
            Self::SummerSchool => "summer-school",
            Self::Other(_) => "other",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Undergraduate => "Undergraduate",
            Self::Master => "Master",
            Self::Phd => "PhD",
            Self::SummerSchool => "Summer School",
            Self::Other(other) => other,
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ============================================================================
// Merging and Grouping
// ============================================================================

/// A course on display: every year of the same (name, university, level).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCourse {
    pub name: String,
    pub university: String,
    pub level: Level,

    /// Distinct years, most recent first.
    pub years: Vec<u16>,
}

impl MergedCourse {
    /// Anchor id for the course card.
    pub fn anchor(&self) -> String {
        let key = format!("{} {} {}", self.name, self.university, self.level);
        format!("course-{}", slugify(&key))
    }

    /// Most recent year this course ran.
    pub fn latest_year(&self) -> u16 {
        self.years.first().copied().unwrap_or(0)
    }
}

/// Courses of one university in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniversityGroup {
    pub university: String,
    pub courses: Vec<MergedCourse>,
}

impl UniversityGroup {
    /// Most recent year any course of this university ran.
    fn latest_year(&self) -> u16 {
        self.courses
            .iter()
            .map(MergedCourse::latest_year)
            .max()
            .unwrap_or(0)
    }
}

/// Collapse repeated instances into one entry per (name, university, level).
///
/// Years collect into a descending, deduplicated list. First appearance
/// in the input decides the relative order of merged entries.
pub fn merge_courses(instances: &[CourseInstance]) -> Vec<MergedCourse> {
    let mut merged: Vec<MergedCourse> = Vec::new();
    let mut index: FxHashMap<(&str, &str, &Level), usize> = FxHashMap::default();

    for instance in instances {
        let key = (
            instance.name.as_str(),
            instance.university.as_str(),
            &instance.level,
        );
        match index.get(&key) {
            Some(&at) => merged[at].years.push(instance.year),
            None => {
                index.insert(key, merged.len());
                merged.push(MergedCourse {
                    name: instance.name.clone(),
                    university: instance.university.clone(),
                    level: instance.level.clone(),
                    years: vec![instance.year],
                });
            }
        }
    }

    for course in &mut merged {
        course.years.sort_unstable_by(|a, b| b.cmp(a));
        course.years.dedup();
    }

    merged
}

/// Group merged courses by university.
///
/// Universities with more recent activity come first; ties break
/// alphabetically. Within a group, courses keep their merge order.
pub fn group_by_university(merged: Vec<MergedCourse>) -> Vec<UniversityGroup> {
    let mut groups: Vec<UniversityGroup> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for course in merged {
        match index.get(course.university.as_str()) {
            Some(&at) => groups[at].courses.push(course),
            None => {
                index.insert(course.university.clone(), groups.len());
                groups.push(UniversityGroup {
                    university: course.university.clone(),
                    courses: vec![course],
                });
            }
        }
    }

    groups.sort_by(|a, b| {
        b.latest_year()
            .cmp(&a.latest_year())
            .then_with(|| a.university.cmp(&b.university))
    });

    groups
}

// ============================================================================
// Tests
// ============================================================================
