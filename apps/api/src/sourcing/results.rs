//! Result Parser — turns one external search result into a candidate draft,
//! or rejects it. Rejection is a signal, not an error: the batch continues
//! and rejected results are only visible in debug logs.

use regex::Regex;
use thiserror::Error;

use crate::extraction::fields::{detect_skills, extract_years, detect_location, SKILLS_CAP};
use crate::models::candidate::{CandidateDraft, Provenance};
use crate::sourcing::keywords::ANCHOR_REGION_PRIMARY;
use crate::sourcing::scoring::{match_score, matched_keywords};
use crate::sourcing::search::SearchResult;

/// Longest name accepted, in characters. Sourced names are routinely
/// non-ASCII, so byte length is the wrong measure here.
const NAME_CEILING: usize = 60;

/// The platforms a sourcing run queries, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    LinkedIn,
    Behance,
    Wuzzuf,
}

impl Platform {
    pub fn all() -> [Platform; 3] {
        [Platform::LinkedIn, Platform::Behance, Platform::Wuzzuf]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Behance => "Behance",
            Platform::Wuzzuf => "Wuzzuf",
        }
    }

    /// `site:` filter handed to the search provider.
    pub fn site_filter(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin.com/in",
            Platform::Behance => "behance.net",
            Platform::Wuzzuf => "wuzzuf.net",
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            Platform::LinkedIn => Provenance::LinkedIn,
            Platform::Behance => Provenance::Behance,
            Platform::Wuzzuf => Provenance::Wuzzuf,
        }
    }
}

/// Why a single search result was dropped. The batch is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultRejection {
    #[error("URL does not belong to the expected platform")]
    PlatformMismatch,

    #[error("extracted name looks like boilerplate: {0}")]
    GarbageName(String),

    #[error("no usable identity key")]
    MissingIdentity,
}

/// Parses one search result fetched for `platform`, scoring it against the
/// keyword combination that produced it.
pub fn parse_result(
    result: &SearchResult,
    platform: Platform,
    keywords: &[String],
) -> Result<CandidateDraft, ResultRejection> {
    let (full_name, title, profile_url, portfolio_url) = match platform {
        Platform::LinkedIn => parse_linkedin(result)?,
        Platform::Behance => parse_behance(result)?,
        Platform::Wuzzuf => parse_wuzzuf(result)?,
    };

    if full_name.chars().count() > NAME_CEILING || is_shouting(&full_name) {
        return Err(ResultRejection::GarbageName(full_name));
    }

    let combined = format!("{} {}", result.title, result.description);
    let skills = detect_skills(&combined, SKILLS_CAP);
    let score = match_score(&combined, keywords, skills.len());
    let found = matched_keywords(&combined, keywords);
    let match_reason = build_match_reason(&found, platform);

    let mut draft = CandidateDraft {
        full_name,
        title,
        location: detect_location(&combined, ANCHOR_REGION_PRIMARY),
        years_experience: extract_years(&combined) as i32,
        email: String::new(),
        phone: String::new(),
        profile_url,
        portfolio_url,
        skills,
        tools: vec![],
        work_history: vec![],
        provenance: platform.provenance(),
        match_score: score,
        match_reason,
        dedup_key: String::new(),
    };

    // Identity priority first, raw result URL as the last resort.
    draft.dedup_key = draft
        .identity_key()
        .map(str::to_string)
        .or_else(|| (!result.url.is_empty()).then(|| result.url.clone()))
        .ok_or(ResultRejection::MissingIdentity)?;

    Ok(draft)
}

/// name, title, profile_url, portfolio_url
type ParsedIdentity = (String, String, String, String);

fn parse_linkedin(result: &SearchResult) -> Result<ParsedIdentity, ResultRejection> {
    let slug_re = Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_%.\-]+)").unwrap();
    let slug = slug_re
        .captures(&result.url)
        .map(|c| c[1].to_string())
        .ok_or(ResultRejection::PlatformMismatch)?;
    let profile_url = format!("https://www.linkedin.com/in/{slug}");

    let cleaned = strip_network_suffix(&result.title, "LinkedIn");
    let (name, title) = match cleaned.split_once(" - ") {
        Some((name, rest)) => (name.trim().to_string(), strip_employer(rest)),
        None => (
            truncate(cleaned.trim(), NAME_CEILING),
            first_sentence(&result.description),
        ),
    };

    Ok((name, title, profile_url, String::new()))
}

fn parse_behance(result: &SearchResult) -> Result<ParsedIdentity, ResultRejection> {
    let slug_re = Regex::new(r"(?i)behance\.net/([A-Za-z0-9_\-]+)").unwrap();
    let slug = slug_re
        .captures(&result.url)
        .map(|c| c[1].to_string())
        .ok_or(ResultRejection::PlatformMismatch)?;
    let portfolio_url = format!("https://www.behance.net/{slug}");

    let mut name = strip_network_suffix(&result.title, "Behance");
    for marker in [" on Behance", "'s Portfolio", " Portfolio", " - Portfolio"] {
        if let Some(idx) = name.find(marker) {
            name.truncate(idx);
        }
    }
    let name = truncate(name.trim(), NAME_CEILING);
    let title = first_sentence(&result.description);

    Ok((name, title, String::new(), portfolio_url))
}

fn parse_wuzzuf(result: &SearchResult) -> Result<ParsedIdentity, ResultRejection> {
    if !result.url.to_lowercase().contains("wuzzuf.net") {
        return Err(ResultRejection::PlatformMismatch);
    }

    // A job-board listing stands in for a candidate: the posting title
    // usually reads "<Listing> - <Company/Context>".
    let cleaned = strip_network_suffix(&result.title, "Wuzzuf");
    let (name, title) = match cleaned.split_once(" - ") {
        Some((name, rest)) => (name.trim().to_string(), rest.trim().to_string()),
        None => (
            truncate(cleaned.trim(), NAME_CEILING),
            first_sentence(&result.description),
        ),
    };

    Ok((name, title, String::new(), String::new()))
}

/// Strips a trailing "| <Network>" marker from a result title. The marker is
/// matched case-insensitively against the title itself; indexing a lowercased
/// copy is not safe because lowercasing can change byte offsets.
fn strip_network_suffix(title: &str, network: &str) -> String {
    let marker = format!("| {network}");
    let hit = title
        .char_indices()
        .rev()
        .map(|(idx, _)| idx)
        .find(|&idx| {
            title
                .get(idx..idx + marker.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(&marker))
        });
    match hit {
        Some(idx) => title[..idx].trim_end().to_string(),
        None => title.trim().to_string(),
    }
}

/// Drops an " at <Employer>" tail from a title string.
fn strip_employer(title: &str) -> String {
    title
        .split(" at ")
        .next()
        .unwrap_or(title)
        .trim()
        .to_string()
}

fn first_sentence(text: &str) -> String {
    let sentence = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");
    truncate(sentence, 80)
}

fn truncate(text: &str, max_len: usize) -> String {
    text.chars().take(max_len).collect()
}

/// All-uppercase "names" are company boilerplate, not people.
fn is_shouting(name: &str) -> bool {
    let letters: Vec<char> = name.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 3 && letters.iter().all(|c| c.is_uppercase())
}

fn build_match_reason(found: &[String], platform: Platform) -> String {
    if found.is_empty() {
        format!("Sourced from {} (no direct keyword hits)", platform.label())
    } else {
        format!(
            "Matched keywords: {} — sourced from {}",
            found.join(", "),
            platform.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str, description: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
        }
    }

    fn kw(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_linkedin_full_parse() {
        let r = result(
            "Jane Doe - Senior Backend Engineer at Acme | LinkedIn",
            "https://www.linkedin.com/in/jane-doe",
            "Experienced engineer based in Cairo. 6 years of Node.js.",
        );
        let draft = parse_result(&r, Platform::LinkedIn, &kw(&["backend"])).unwrap();
        assert_eq!(draft.full_name, "Jane Doe");
        assert_eq!(draft.title, "Senior Backend Engineer");
        assert_eq!(draft.profile_url, "https://www.linkedin.com/in/jane-doe");
        assert_eq!(draft.dedup_key, "https://www.linkedin.com/in/jane-doe");
        assert_eq!(draft.location, "Cairo");
        assert_eq!(draft.years_experience, 6);
        assert_eq!(draft.provenance, Provenance::LinkedIn);
    }

    #[test]
    fn test_linkedin_without_separator_uses_description() {
        let r = result(
            "Jane Doe | LinkedIn",
            "https://linkedin.com/in/jane-doe",
            "Graphic designer and illustrator. Based remotely.",
        );
        let draft = parse_result(&r, Platform::LinkedIn, &[]).unwrap();
        assert_eq!(draft.full_name, "Jane Doe");
        assert_eq!(draft.title, "Graphic designer and illustrator");
    }

    #[test]
    fn test_linkedin_platform_mismatch_rejected() {
        let r = result("Jane Doe", "https://example.com/jane", "whatever");
        assert_eq!(
            parse_result(&r, Platform::LinkedIn, &[]).unwrap_err(),
            ResultRejection::PlatformMismatch
        );
    }

    #[test]
    fn test_behance_strips_portfolio_markers() {
        let r = result(
            "Omar Hassan on Behance",
            "https://www.behance.net/omarhassan",
            "Brand identity and motion work. Available for hire.",
        );
        let draft = parse_result(&r, Platform::Behance, &[]).unwrap();
        assert_eq!(draft.full_name, "Omar Hassan");
        assert_eq!(draft.title, "Brand identity and motion work");
        assert_eq!(draft.portfolio_url, "https://www.behance.net/omarhassan");
        assert_eq!(draft.dedup_key, "https://www.behance.net/omarhassan");
    }

    #[test]
    fn test_wuzzuf_listing_stands_in_for_candidate() {
        let r = result(
            "Senior Graphic Designer - Cairo Agency",
            "https://wuzzuf.net/jobs/p/12345-senior-graphic-designer",
            "Own the brand toolkit. Photoshop required.",
        );
        let draft = parse_result(&r, Platform::Wuzzuf, &[]).unwrap();
        assert_eq!(draft.full_name, "Senior Graphic Designer");
        assert_eq!(draft.title, "Cairo Agency");
        assert_eq!(
            draft.dedup_key,
            "https://wuzzuf.net/jobs/p/12345-senior-graphic-designer"
        );
    }

    #[test]
    fn test_all_uppercase_name_rejected() {
        let r = result(
            "ACME RECRUITING | LinkedIn",
            "https://linkedin.com/in/acme-recruiting",
            "We hire the best.",
        );
        assert!(matches!(
            parse_result(&r, Platform::LinkedIn, &[]).unwrap_err(),
            ResultRejection::GarbageName(_)
        ));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let long_name = "A very ".repeat(20) + "long name";
        let r = result(
            &format!("{long_name} - Designer | LinkedIn"),
            "https://linkedin.com/in/someone",
            "",
        );
        assert!(matches!(
            parse_result(&r, Platform::LinkedIn, &[]).unwrap_err(),
            ResultRejection::GarbageName(_)
        ));
    }

    #[test]
    fn test_location_defaults_to_anchor_region() {
        let r = result(
            "Jane Doe - Designer | LinkedIn",
            "https://linkedin.com/in/jane-doe",
            "No location mentioned anywhere",
        );
        let draft = parse_result(&r, Platform::LinkedIn, &[]).unwrap();
        assert_eq!(draft.location, "Egypt");
    }

    #[test]
    fn test_match_reason_names_keywords_and_platform() {
        let r = result(
            "Jane Doe - Designer | LinkedIn",
            "https://linkedin.com/in/jane-doe",
            "photoshop specialist",
        );
        let draft = parse_result(&r, Platform::LinkedIn, &kw(&["photoshop"])).unwrap();
        assert!(draft.match_reason.contains("photoshop"));
        assert!(draft.match_reason.contains("LinkedIn"));
    }

    #[test]
    fn test_suffix_strip_survives_length_changing_unicode() {
        // "ẞ" shrinks from 3 bytes to 2 under lowercasing; the marker offset
        // must come from the original title, not a lowercased copy.
        assert_eq!(strip_network_suffix("ẞẞ | LinkedIn", "LinkedIn"), "ẞẞ");
        assert_eq!(
            strip_network_suffix("Özil Yılmaz | linkedin", "LinkedIn"),
            "Özil Yılmaz"
        );
        assert_eq!(strip_network_suffix("no marker here", "LinkedIn"), "no marker here");
    }

    #[test]
    fn test_multibyte_name_within_char_ceiling_accepted() {
        // 38 chars but over 60 bytes; the ceiling is measured in chars.
        let name = "محمد عبد الرحمن الشريف القاهرة للتصميم";
        let r = result(
            &format!("{name} on Behance"),
            "https://www.behance.net/mohamed-design",
            "Brand identity work.",
        );
        let draft = parse_result(&r, Platform::Behance, &[]).unwrap();
        assert_eq!(draft.full_name, name);
    }

    #[test]
    fn test_skills_capped_at_six() {
        let r = result(
            "Jane Doe - Designer | LinkedIn",
            "https://linkedin.com/in/jane-doe",
            "Photoshop Illustrator InDesign Figma Sketch React Angular Vue",
        );
        let draft = parse_result(&r, Platform::LinkedIn, &[]).unwrap();
        assert_eq!(draft.skills.len(), 6);
    }
}
