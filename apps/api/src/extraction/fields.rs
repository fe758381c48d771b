//! Field Extractor — independent pattern rules over normalized résumé text.
//!
//! Each rule is a policy entry, not a pipeline stage: rules read disjoint
//! regions of the same text, so their order does not matter. Every rule
//! degrades to an empty or placeholder value on no-match; nothing here
//! returns an error.

use regex::Regex;

use crate::extraction::normalize::first_line;
use crate::extraction::patterns::{contains_keyword, matched_keywords};
use crate::models::candidate::{SkillEntry, WorkHistoryEntry};

/// Max characters kept from the first line when guessing a name.
pub const NAME_MAX_LEN: usize = 60;
/// Years-of-experience values above this are treated as accidental matches
/// (phone fragments, dates) and discarded.
pub const YEARS_SANITY_CEILING: u32 = 40;
/// Work-history entries collected per document.
pub const WORK_HISTORY_CAP: usize = 3;
/// Skill entries collected per document.
pub const SKILLS_CAP: usize = 6;

/// Closed technology list tested by literal containment. Shared with the
/// sourcing result parser so both entry points detect the same skills.
pub const TECH_KEYWORDS: &[&str] = &[
    "Photoshop",
    "Illustrator",
    "InDesign",
    "After Effects",
    "Premiere Pro",
    "Figma",
    "Sketch",
    "JavaScript",
    "TypeScript",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Python",
    "Java",
    "C#",
    "C++",
    "PHP",
    "Ruby",
    "Golang",
    "Swift",
    "Kotlin",
    "Flutter",
    "SQL",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "AWS",
    "Azure",
    ".NET",
];

/// Closed tool list, same matching rules as `TECH_KEYWORDS`.
pub const TOOL_KEYWORDS: &[&str] = &[
    "Git",
    "Docker",
    "Kubernetes",
    "Jira",
    "Jenkins",
    "Terraform",
    "Postman",
    "Excel",
    "Power BI",
    "Tableau",
];

/// Ordered role titles for the title guess; first containment hit wins.
/// More specific titles come before the generic ones they contain.
pub const ROLE_TITLES: &[&str] = &[
    "Art Director",
    "Creative Director",
    "Senior Graphic Designer",
    "Graphic Designer",
    "UI/UX Designer",
    "Motion Designer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "Mobile Developer",
    "DevOps Engineer",
    "Data Scientist",
    "Data Analyst",
    "Product Manager",
    "Project Manager",
    "QA Engineer",
    "Software Engineer",
];

/// Closed city/region list for location detection, checked in order.
pub const KNOWN_LOCATIONS: &[&str] = &[
    "Cairo",
    "Alexandria",
    "Giza",
    "Dubai",
    "Abu Dhabi",
    "Sharjah",
    "Riyadh",
    "Jeddah",
    "Doha",
    "Kuwait City",
    "Manama",
    "Muscat",
    "Egypt",
    "United Arab Emirates",
    "Saudi Arabia",
    "Qatar",
    "Kuwait",
    "Bahrain",
    "Oman",
    "Remote",
];

/// Everything the extractor can pull from one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub profile_url: String,
    pub portfolio_url: String,
    pub location: String,
    pub years_experience: i32,
    pub skills: Vec<SkillEntry>,
    pub tools: Vec<SkillEntry>,
    pub work_history: Vec<WorkHistoryEntry>,
}

/// Runs every rule over `text`. `fallback_name` covers documents with no
/// usable first line (typically the uploaded filename stem);
/// `default_location` is chosen by the entry point ("Remote" for uploads).
pub fn extract_fields(text: &str, fallback_name: &str, default_location: &str) -> ExtractedFields {
    ExtractedFields {
        full_name: guess_name(text, fallback_name),
        title: guess_title(text),
        email: extract_email(text),
        phone: extract_phone(text),
        profile_url: extract_profile_url(text),
        portfolio_url: extract_portfolio_url(text),
        location: detect_location(text, default_location),
        years_experience: extract_years(text) as i32,
        skills: detect_skills(text, SKILLS_CAP),
        tools: detect_tools(text),
        work_history: extract_work_history(text),
    }
}

/// First `local@domain.tld` shape, else empty.
pub fn extract_email(text: &str) -> String {
    let re = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap();
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

/// Optional leading "+" then a 9–16 character run of digits/spaces/hyphens.
pub fn extract_phone(text: &str) -> String {
    let re = Regex::new(r"\+?[0-9][0-9 \-]{8,15}").unwrap();
    re.find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First `linkedin.com/in/<slug>`, canonicalized to the https www form.
pub fn extract_profile_url(text: &str) -> String {
    let re = Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_%.\-]+)").unwrap();
    re.captures(text)
        .map(|c| format!("https://www.linkedin.com/in/{}", &c[1]))
        .unwrap_or_default()
}

// Portfolio domains in fixed priority order; first hit wins.
const PORTFOLIO_DOMAINS: &[&str] = &["behance.net", "dribbble.com"];

/// First portfolio-site profile URL, canonicalized to `https://www.<match>`.
pub fn extract_portfolio_url(text: &str) -> String {
    for domain in PORTFOLIO_DOMAINS {
        let re = Regex::new(&format!(
            r"(?i){}/([A-Za-z0-9_\-]+)",
            regex::escape(domain)
        ))
        .unwrap();
        if let Some(c) = re.captures(text) {
            return format!("https://www.{}/{}", domain, &c[1]);
        }
    }
    String::new()
}

/// First known city/region (table order), else the caller's default.
pub fn detect_location(text: &str, default: &str) -> String {
    KNOWN_LOCATIONS
        .iter()
        .find(|loc| contains_keyword(text, loc))
        .map(|loc| loc.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// First `<digits>[+]? years|yrs` match, parsed as an integer. Values above
/// the sanity ceiling are treated as accidental matches and discarded.
pub fn extract_years(text: &str) -> u32 {
    let re = Regex::new(r"(?i)(\d{1,3})\s*\+?\s*(?:years|yrs)").unwrap();
    let years = re
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0);
    if years > YEARS_SANITY_CEILING {
        0
    } else {
        years
    }
}

/// First role-title containment hit (table order), default "Candidate".
pub fn guess_title(text: &str) -> String {
    ROLE_TITLES
        .iter()
        .find(|role| contains_keyword(text, role))
        .map(|role| role.to_string())
        .unwrap_or_else(|| "Candidate".to_string())
}

/// First non-empty line truncated to `NAME_MAX_LEN`, else the fallback.
pub fn guess_name(text: &str, fallback: &str) -> String {
    first_line(text, NAME_MAX_LEN).unwrap_or_else(|| fallback.to_string())
}

/// Literal containment over the closed technology list; each hit becomes a
/// `{name, years: 1}` entry, capped at `cap`.
pub fn detect_skills(text: &str, cap: usize) -> Vec<SkillEntry> {
    matched_keywords(text, TECH_KEYWORDS, cap)
        .into_iter()
        .map(SkillEntry::new)
        .collect()
}

/// Same matching as `detect_skills`, over the tool table, uncapped.
pub fn detect_tools(text: &str) -> Vec<SkillEntry> {
    matched_keywords(text, TOOL_KEYWORDS, TOOL_KEYWORDS.len())
        .into_iter()
        .map(SkillEntry::new)
        .collect()
}

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Scans for `[Month]? Year (-|to) (Present|Now|Current|[Month]? Year)` date
/// ranges. Each match captures a 50-before/100-after window of surrounding
/// text as a free-text title context; company/title separation is not
/// attempted here. Stops after `WORK_HISTORY_CAP` matches.
pub fn extract_work_history(text: &str) -> Vec<WorkHistoryEntry> {
    let re = Regex::new(&format!(
        r"(?i)(?:{m}\.?\s+)?(?:19|20)\d{{2}}\s*(?:-|–|—|to)\s*(?:present|now|current|(?:{m}\.?\s+)?(?:19|20)\d{{2}})",
        m = MONTH
    ))
    .unwrap();

    re.find_iter(text)
        .take(WORK_HISTORY_CAP)
        .map(|m| {
            let context = collapse_whitespace(window(text, m.start(), m.end(), 50, 100));
            WorkHistoryEntry {
                company: "Unknown".to_string(),
                title: context,
                years: 1,
            }
        })
        .collect()
}

/// Byte window around a match, widened to the nearest char boundaries.
fn window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let mut lo = start.saturating_sub(before);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + after).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Doe
Senior Graphic Designer based in Cairo
jane.doe@example.com | +20 100 123 4567
linkedin.com/in/jane-doe | behance.net/janedoe
8+ years of experience with Photoshop, Illustrator and Figma.
Freelance work, Jan 2020 - Present
Design Studio, 2015 to 2019
";

    #[test]
    fn test_extract_email_first_match() {
        assert_eq!(extract_email(RESUME), "jane.doe@example.com");
        assert_eq!(extract_email("no contact info"), "");
    }

    #[test]
    fn test_extract_phone_with_plus_prefix() {
        assert_eq!(extract_phone(RESUME), "+20 100 123 4567");
        assert_eq!(extract_phone("call me maybe"), "");
    }

    #[test]
    fn test_profile_url_is_canonicalized() {
        assert_eq!(
            extract_profile_url(RESUME),
            "https://www.linkedin.com/in/jane-doe"
        );
        assert_eq!(extract_profile_url("no links"), "");
    }

    #[test]
    fn test_portfolio_priority_behance_before_dribbble() {
        let both = "dribbble.com/jd and behance.net/janedoe";
        assert_eq!(
            extract_portfolio_url(both),
            "https://www.behance.net/janedoe"
        );
        assert_eq!(
            extract_portfolio_url("see dribbble.com/jd"),
            "https://www.dribbble.com/jd"
        );
    }

    #[test]
    fn test_location_first_table_hit() {
        assert_eq!(detect_location(RESUME, "Remote"), "Cairo");
        assert_eq!(detect_location("somewhere nice", "Remote"), "Remote");
    }

    #[test]
    fn test_years_parses_plus_suffix() {
        assert_eq!(extract_years(RESUME), 8);
        assert_eq!(extract_years("2 yrs in design"), 2);
    }

    #[test]
    fn test_years_above_ceiling_discarded() {
        assert_eq!(extract_years("128 years of wisdom"), 0);
        assert_eq!(extract_years("40 years"), 40);
    }

    #[test]
    fn test_years_defaults_to_zero() {
        assert_eq!(extract_years("fresh graduate"), 0);
    }

    #[test]
    fn test_title_guess_specific_before_generic() {
        assert_eq!(guess_title(RESUME), "Senior Graphic Designer");
        assert_eq!(guess_title("aspiring astronaut"), "Candidate");
    }

    #[test]
    fn test_name_guess_first_line_and_fallback() {
        assert_eq!(guess_name(RESUME, "cv.pdf"), "Jane Doe");
        assert_eq!(guess_name("", "cv.pdf"), "cv.pdf");
    }

    #[test]
    fn test_name_guess_truncated() {
        let long = "A".repeat(200);
        assert_eq!(guess_name(&long, "x").len(), NAME_MAX_LEN);
    }

    #[test]
    fn test_skills_literal_special_chars() {
        let text = "Strong C# and Node.js, some C++ exposure";
        let names: Vec<_> = detect_skills(text, SKILLS_CAP)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert!(names.contains(&"C#".to_string()));
        assert!(names.contains(&"C++".to_string()));
        assert!(names.contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_skills_do_not_overmatch_special_chars() {
        let names: Vec<_> = detect_skills("Clojure and Crystal fan", SKILLS_CAP)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert!(!names.contains(&"C#".to_string()));
        assert!(!names.contains(&"C++".to_string()));
    }

    #[test]
    fn test_skills_capped() {
        let text = "Photoshop Illustrator InDesign Figma Sketch React Angular Vue";
        assert_eq!(detect_skills(text, SKILLS_CAP).len(), SKILLS_CAP);
    }

    #[test]
    fn test_tools_detected_with_default_years() {
        let tools = detect_tools("daily driver: Git, Docker and Jira");
        assert_eq!(tools.len(), 3);
        assert!(tools.iter().all(|t| t.years == 1));
    }

    #[test]
    fn test_work_history_two_ranges() {
        let entries = extract_work_history("Jan 2020 - Present at a studio. Before that 2018 - 2019 elsewhere.");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.company == "Unknown"));
        assert!(entries.iter().all(|e| !e.title.is_empty()));
        assert!(entries.iter().all(|e| e.years == 1));
    }

    #[test]
    fn test_work_history_capped_at_three() {
        let text = "2010 to 2011, then 2012 to 2013, then 2014 to 2015, then 2016 to 2017";
        assert_eq!(extract_work_history(text).len(), WORK_HISTORY_CAP);
    }

    #[test]
    fn test_work_history_context_collapses_whitespace() {
        let entries = extract_work_history("Lead   Designer\n\n Jan 2020 - Present");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].title.starts_with("Lead Designer"));
    }

    #[test]
    fn test_extract_fields_composite_defaults() {
        let fields = extract_fields("", "resume.pdf", "Remote");
        assert_eq!(fields.full_name, "resume.pdf");
        assert_eq!(fields.title, "Candidate");
        assert_eq!(fields.location, "Remote");
        assert_eq!(fields.years_experience, 0);
        assert!(fields.skills.is_empty());
        assert!(fields.work_history.is_empty());
    }

    #[test]
    fn test_extract_fields_full_resume() {
        let fields = extract_fields(RESUME, "x", "Remote");
        assert_eq!(fields.full_name, "Jane Doe");
        assert_eq!(fields.email, "jane.doe@example.com");
        assert_eq!(fields.profile_url, "https://www.linkedin.com/in/jane-doe");
        assert_eq!(fields.portfolio_url, "https://www.behance.net/janedoe");
        assert_eq!(fields.location, "Cairo");
        assert_eq!(fields.years_experience, 8);
        assert_eq!(fields.work_history.len(), 2);
    }
}
