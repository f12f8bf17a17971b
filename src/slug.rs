//! Slug generation for stable element anchors.
//!
//! Paper entries and course cards carry `id` attributes so individual
//! items can be linked to directly. Slugs are derived from the item's
//! identifying text: transliterated to ASCII, lowercased, with every
//! run of non-alphanumeric characters collapsed into a single hyphen.

use deunicode::deunicode;

/// Convert arbitrary text to a URL-safe anchor slug.
///
/// # Example
///
/// ```ignore
/// assert_eq!(slugify("Cost–Benefit Analysis"), "cost-benefit-analysis");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
