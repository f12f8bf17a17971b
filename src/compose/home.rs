//! Home view: profile photo, interests, bio and contact block.

use crate::{config::ProfileConfig, markup::Markup};
use anyhow::Result;

pub(super) fn render(profile: &ProfileConfig) -> Result<String> {
    let mut m = Markup::new();
    m.elem(
        "div",
        &[("id", "home"), ("class", "page-content active")],
        |m| {
            m.elem("div", &[("class", "profile-container")], |m| {
                profile_image(m, profile)?;
                m.elem("div", &[("class", "profile-details")], |m| {
                    m.elem("div", &[], |m| {
                        m.text_elem("h1", &[], "Welcome!")?;
                        intro_paragraphs(m, profile)?;
                        bio_paragraphs(m, profile)
                    })?;
                    contact_info(m, profile)?;
                    social_links(m, profile)
                })
            })
        },
    )?;
    m.into_string()
}

fn profile_image(m: &mut Markup, profile: &ProfileConfig) -> Result<()> {
    let src = format!("/{}", profile.photo);
    let alt = format!("Profile Picture of {}", profile.name);
    m.elem("div", &[("class", "profile-image")], |m| {
        m.leaf("img", &[("src", &src), ("alt", &alt)])
    })
}

/// Position and interests lines. Both degrade by omission when the
/// profile leaves them empty.
fn intro_paragraphs(m: &mut Markup, profile: &ProfileConfig) -> Result<()> {
    if !profile.position.is_empty() {
        m.elem("p", &[], |m| {
            m.text(&format!("I am a {}", profile.position))?;
            if !profile.institution.is_empty() {
                m.text(" at ")?;
                m.text_elem("strong", &[], &profile.institution)?;
            }
            Ok(())
        })?;
    }

    if !profile.interests.is_empty() {
        m.elem("p", &[], |m| {
            m.text("My research interests lie in ")?;
            for (i, interest) in profile.interests.iter().enumerate() {
                if i > 0 {
                    let sep = if i + 1 == profile.interests.len() {
                        " and "
                    } else {
                        ", "
                    };
                    m.text(sep)?;
                }
                m.text_elem("strong", &[], interest)?;
            }
            m.text(".")
        })?;
    }

    Ok(())
}

/// Authored paragraphs, trusted markup.
fn bio_paragraphs(m: &mut Markup, profile: &ProfileConfig) -> Result<()> {
    for paragraph in &profile.bio {
        m.elem("p", &[], |m| m.raw(paragraph))?;
    }
    Ok(())
}

fn contact_info(m: &mut Markup, profile: &ProfileConfig) -> Result<()> {
    let affiliation = match (
        profile.institution.is_empty(),
        profile.department.is_empty(),
    ) {
        (false, false) => format!("{}, {}", profile.institution, profile.department),
        (false, true) => profile.institution.clone(),
        (true, false) => profile.department.clone(),
        (true, true) => String::new(),
    };

    m.elem("div", &[("class", "contact-info")], |m| {
        m.text_elem("h3", &[], "Contact Information")?;

        if !affiliation.is_empty() || !profile.address.is_empty() {
            m.elem("p", &[], |m| {
                m.text_elem("strong", &[], "Address:")?;
                if !affiliation.is_empty() {
                    m.leaf("br", &[])?;
                    m.text(&affiliation)?;
                }
                if !profile.address.is_empty() {
                    m.leaf("br", &[])?;
                    m.text(&profile.address)?;
                }
                Ok(())
            })?;
        }

        let mailto = format!("mailto:{}", profile.email);
        m.elem("p", &[], |m| {
            m.text_elem("strong", &[], "Email:")?;
            m.text(" ")?;
            m.text_elem("a", &[("href", &mailto)], &profile.email)
        })
    })
}

fn social_links(m: &mut Markup, profile: &ProfileConfig) -> Result<()> {
    if profile.social.is_empty() {
        return Ok(());
    }
    m.elem("div", &[("class", "social-links")], |m| {
        for link in &profile.social {
            m.text_elem(
                "a",
                &[
                    ("class", "social-link"),
                    ("href", &link.url),
                    ("target", "_blank"),
                    ("rel", "noopener"),
                ],
                &link.label,
            )?;
        }
        Ok(())
    })
}
