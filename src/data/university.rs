//! University reference table.
//!
//! Course instances name universities informally ("QMUL", "University
//! of Bologna"). This table supplies the logo and website for the
//! group header when a match exists; unmatched names degrade to a bare
//! heading.

use serde::Deserialize;

/// Contents of `universities.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniversityTable {
    /// `[[universities]]` entries
    #[serde(default)]
    pub universities: Vec<University>,
}

/// One institution referenced from course instances.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct University {
    /// Full display name, matched against course `university` fields.
    pub name: String,

    /// Uppercase abbreviation (e.g., "QMUL"), also matched.
    pub short_name: String,

    /// Logo image, relative to the assets directory.
    #[serde(default)]
    pub logo: Option<String>,

    /// Homepage linked from the group heading.
    #[serde(default)]
    pub website: Option<String>,
}

impl UniversityTable {
    /// Find a university by full name or abbreviation.
    pub fn find(&self, name: &str) -> Option<&University> {
        self.universities
            .iter()
            .find(|u| u.name == name || u.short_name == name.to_uppercase())
    }
}
