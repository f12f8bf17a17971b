//! `[profile]` section configuration.
//!
//! The person behind the site: identity, affiliation, contact details
//! and the content of the home view. Everything the generator knows
//! about its owner lives here.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[profile]` section in lectern.toml - owner identity and contact.
///
/// # Example
/// ```toml
/// [profile]
/// name = "Chiara Bernardi"
/// position = "PhD Candidate"
/// institution = "Queen Mary University of London"
/// department = "School of Economics and Finance"
/// address = "Mile End Road, London E1 4NS"
/// email = "c.bernardi@qmul.ac.uk"
/// interests = ["labour economics", "gender economics"]
/// bio = ["I am on the 2025/26 job market."]
///
/// [[profile.social]]
/// label = "Twitter"
/// url = "https://twitter.com/example"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Full name, shown in the site header and page titles.
    #[serde(default)]
    pub name: String,

    /// Current position (e.g., "PhD Candidate").
    #[serde(default)]
    pub position: String,

    /// Affiliated institution.
    #[serde(default)]
    pub institution: String,

    /// Department or school within the institution.
    #[serde(default)]
    pub department: String,

    /// Postal address lines for the contact block.
    #[serde(default)]
    pub address: String,

    /// Contact email address.
    #[serde(default)]
    pub email: String,

    /// Profile photo, relative to the assets directory.
    #[serde(default = "defaults::profile::photo")]
    #[educe(Default = defaults::profile::photo())]
    pub photo: String,

    /// CV document shown on the vitae view, relative to the assets directory.
    #[serde(default = "defaults::profile::cv_document")]
    #[educe(Default = defaults::profile::cv_document())]
    pub cv_document: String,

    /// Research interests, joined into a sentence on the home view.
    #[serde(default)]
    pub interests: Vec<String>,

    /// Biography paragraphs. Trusted markup: inline tags are kept.
    #[serde(default)]
    pub bio: Vec<String>,

    /// External profile links shown below the contact block.
    #[serde(default)]
    pub social: Vec<SocialLink>,
}

/// One `[[profile.social]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Link text (e.g., "Google Scholar").
    pub label: String,

    /// Target URL.
    pub url: String,
}
