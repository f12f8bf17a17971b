//! Teaching view: merged course cards grouped by university.
//!
//! Course instances are first merged across years, then grouped and
//! ordered by university (most recent teaching year first). University
//! headers are enriched with a logo and website link when the
//! university table knows the name, and fall back to the bare name
//! when it does not.

use crate::{
    data::{
        MergedCourse, TeachingData, University, UniversityGroup, UniversityTable,
        group_by_university, merge_courses,
    },
    markup::Markup,
};
use anyhow::Result;

pub(super) fn render(teaching: &TeachingData, universities: &UniversityTable) -> Result<String> {
    let groups = group_by_university(merge_courses(&teaching.courses));

    let mut m = Markup::new();
    m.elem(
        "div",
        &[("id", "teaching"), ("class", "page-content active")],
        |m| {
            m.text_elem("h1", &[], "Teaching")?;
            aside(m, "teaching-intro", teaching.intro.as_deref())?;
            m.elem("div", &[("class", "university-section")], |m| {
                for group in &groups {
                    course_group(m, group, universities)?;
                }
                Ok(())
            })?;
            aside(m, "teaching-outro", teaching.outro.as_deref())
        },
    )?;
    m.into_string()
}

/// Authored intro/outro block, trusted markup.
fn aside(m: &mut Markup, class: &str, content: Option<&str>) -> Result<()> {
    let Some(content) = content else {
        return Ok(());
    };
    m.elem("div", &[("class", class)], |m| m.raw(content))
}

fn course_group(
    m: &mut Markup,
    group: &UniversityGroup,
    universities: &UniversityTable,
) -> Result<()> {
    m.elem("div", &[("class", "course-group")], |m| {
        university_header(m, &group.university, universities.find(&group.university))?;
        m.elem("div", &[("class", "courses-grid")], |m| {
            for course in &group.courses {
                course_card(m, course)?;
            }
            Ok(())
        })
    })
}

fn university_header(
    m: &mut Markup,
    name: &str,
    university: Option<&University>,
) -> Result<()> {
    m.elem("div", &[("class", "university-header")], |m| {
        m.elem("div", &[("class", "university-logo")], |m| {
            if let Some(logo) = university.and_then(|u| u.logo.as_deref()) {
                let src = format!("/{logo}");
                let alt = format!("{name} logo");
                m.leaf("img", &[("src", &src), ("alt", &alt)])?;
            }
            Ok(())
        })?;
        m.elem("div", &[("class", "university-info")], |m| {
            m.elem("h3", &[], |m| {
                match university.and_then(|u| u.website.as_deref()) {
                    Some(website) => {
                        m.text_elem("a", &[("href", website), ("target", "_blank")], name)
                    }
                    None => m.text(name),
                }
            })
        })
    })
}

fn course_card(m: &mut Markup, course: &MergedCourse) -> Result<()> {
    let anchor = course.anchor();
    let level_class = format!("course-level {}", course.level.css_class());
    let level_text = course.level.to_string();

    m.elem("div", &[("class", "course-card"), ("id", &anchor)], |m| {
        m.text_elem("div", &[("class", &level_class)], &level_text)?;
        m.text_elem("h4", &[("class", "course-title")], &course.name)?;
        m.elem("div", &[("class", "course-years")], |m| {
            for year in &course.years {
                m.text_elem("div", &[("class", "year-tag")], &year.to_string())?;
            }
            Ok(())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CourseInstance, Level};

    fn course(name: &str, university: &str, year: u16, level: Level) -> CourseInstance {
        CourseInstance {
            name: name.to_string(),
            university: university.to_string(),
            year,
            level,
        }
    }

    fn make_universities() -> UniversityTable {
        UniversityTable {
            universities: vec![University {
                name: "Queen Mary University of London".to_string(),
                short_name: "QMUL".to_string(),
                logo: Some("images/qmul-logo.jpg".to_string()),
                website: Some("https://www.qmul.ac.uk/".to_string()),
            }],
        }
    }

    #[test]
    fn test_repeated_course_renders_one_card_with_years_descending() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![
                course("Labour Economics", "QM", 2021, Level::Undergraduate),
                course("Labour Economics", "QM", 2022, Level::Undergraduate),
                course("Labour Economics", "QM", 2024, Level::Undergraduate),
            ],
        };

        let html = render(&teaching, &UniversityTable::default()).unwrap();
        assert_eq!(html.matches("course-card").count(), 1);
        assert_eq!(html.matches("year-tag").count(), 3);

        let y2024 = html.find(">2024<").unwrap();
        let y2022 = html.find(">2022<").unwrap();
        let y2021 = html.find(">2021<").unwrap();
        assert!(y2024 < y2022 && y2022 < y2021);
    }

    #[test]
    fn test_universities_ordered_by_most_recent_year() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![
                course("Macroeconomics I", "Ancient University", 2023, Level::Undergraduate),
                course("Labour Economics", "Busy University", 2025, Level::Undergraduate),
            ],
        };

        let html = render(&teaching, &UniversityTable::default()).unwrap();
        let busy = html.find("Busy University").unwrap();
        let ancient = html.find("Ancient University").unwrap();
        assert!(busy < ancient);
    }

    #[test]
    fn test_known_university_header_has_logo_and_link() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![course(
                "Labour Economics",
                "Queen Mary University of London",
                2024,
                Level::Undergraduate,
            )],
        };

        let html = render(&teaching, &make_universities()).unwrap();
        assert!(html.contains(
            r#"<img src="/images/qmul-logo.jpg" alt="Queen Mary University of London logo"/>"#
        ));
        assert!(html.contains(
            r#"<h3><a href="https://www.qmul.ac.uk/" target="_blank">Queen Mary University of London</a></h3>"#
        ));
    }

    #[test]
    fn test_short_name_matches_university_record() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![course("Statistics", "qmul", 2024, Level::Undergraduate)],
        };

        let html = render(&teaching, &make_universities()).unwrap();
        assert!(html.contains(r#"href="https://www.qmul.ac.uk/""#));
    }

    #[test]
    fn test_unknown_university_degrades_to_bare_name() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![course(
                "Public Economics",
                "University of Pavia",
                2016,
                Level::Undergraduate,
            )],
        };

        let html = render(&teaching, &make_universities()).unwrap();
        assert!(html.contains("<h3>University of Pavia</h3>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_level_badge_class_and_text() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![
                course("Macroeconomics", "LSE", 2024, Level::SummerSchool),
                course("Field Seminar", "LSE", 2024, Level::Other("Guest Lecture".to_string())),
            ],
        };

        let html = render(&teaching, &UniversityTable::default()).unwrap();
        assert!(html.contains(r#"<div class="course-level summer-school">Summer School</div>"#));
        assert!(html.contains(r#"<div class="course-level other">Guest Lecture</div>"#));
    }

    #[test]
    fn test_intro_and_outro_only_when_present() {
        let bare = TeachingData {
            intro: None,
            outro: None,
            courses: vec![],
        };
        let html = render(&bare, &UniversityTable::default()).unwrap();
        assert!(!html.contains("teaching-intro"));
        assert!(!html.contains("teaching-outro"));

        let authored = TeachingData {
            intro: Some("I teach <strong>applied</strong> courses.".to_string()),
            outro: Some("Evaluations available on request.".to_string()),
            courses: vec![],
        };
        let html = render(&authored, &UniversityTable::default()).unwrap();
        assert!(html.contains(
            r#"<div class="teaching-intro">I teach <strong>applied</strong> courses.</div>"#
        ));
        assert!(html.contains("teaching-outro"));
        let intro = html.find("teaching-intro").unwrap();
        let outro = html.find("teaching-outro").unwrap();
        assert!(intro < outro);
    }

    #[test]
    fn test_course_anchor_is_slugged() {
        let teaching = TeachingData {
            intro: None,
            outro: None,
            courses: vec![course(
                "Cost–Benefit Analysis",
                "QMUL",
                2025,
                Level::Master,
            )],
        };

        let html = render(&teaching, &make_universities()).unwrap();
        assert!(html.contains(r#"id="course-cost-benefit-analysis-qmul-master""#));
    }
}
