//! Scorer — deterministic additive match score in [0, 99].
//!
//! The ceiling is 99 on purpose: automatically scored candidates never reach
//! a round 100, which visually separates them from a manual/perfect match.

use crate::extraction::patterns::contains_keyword;

pub const BASE_SCORE: i32 = 45;
pub const KEYWORD_BONUS: i32 = 12;
pub const SKILL_BONUS: i32 = 2;
pub const PRIMARY_MARKET_BONUS: i32 = 15;
pub const SECONDARY_MARKET_BONUS: i32 = 10;
pub const EMPLOYER_BONUS: i32 = 20;
pub const SCORE_CEILING: i32 = 99;

/// Primary target market signal terms.
const PRIMARY_MARKET_TERMS: [&str; 2] = ["egypt", "cairo"];

/// Secondary regional bloc signal terms.
const SECONDARY_MARKET_TERMS: [&str; 9] = [
    "gulf", "gcc", "uae", "dubai", "saudi", "qatar", "kuwait", "bahrain", "oman",
];

/// Employer aliases treated as a strong positive signal.
const STRONG_EMPLOYER_ALIASES: [&str; 3] = ["vodafone", "_vois", "valeo"];

/// Additive match score for `text` (title + description) against the search
/// keywords. `skill_count` is the number of detected skill entries; it is
/// intentionally additive on top of keyword hits even when a skill is also a
/// literal keyword. Pure, and order-independent except for the final clamp.
pub fn match_score(text: &str, keywords: &[String], skill_count: usize) -> i32 {
    let lower = text.to_lowercase();

    let keyword_hits = keywords
        .iter()
        .filter(|kw| contains_keyword(&lower, kw))
        .count() as i32;

    let mut score = BASE_SCORE + keyword_hits * KEYWORD_BONUS + skill_count as i32 * SKILL_BONUS;

    if PRIMARY_MARKET_TERMS.iter().any(|t| lower.contains(t)) {
        score += PRIMARY_MARKET_BONUS;
    }
    if SECONDARY_MARKET_TERMS.iter().any(|t| lower.contains(t)) {
        score += SECONDARY_MARKET_BONUS;
    }
    if STRONG_EMPLOYER_ALIASES.iter().any(|t| lower.contains(t)) {
        score += EMPLOYER_BONUS;
    }

    score.min(SCORE_CEILING)
}

/// Which of the search keywords actually appear in the text, table order.
pub fn matched_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|kw| contains_keyword(text, kw))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_base_score_for_no_signal_text() {
        assert_eq!(match_score("nothing relevant here", &[], 0), BASE_SCORE);
    }

    #[test]
    fn test_keyword_bonus_per_hit() {
        let keywords = kw(&["designer", "photoshop"]);
        let one = match_score("a designer portfolio", &keywords, 0);
        let two = match_score("a designer who loves photoshop", &keywords, 0);
        assert_eq!(one, BASE_SCORE + KEYWORD_BONUS);
        assert_eq!(two, BASE_SCORE + 2 * KEYWORD_BONUS);
    }

    #[test]
    fn test_monotonic_in_keyword_matches() {
        let keywords = kw(&["designer", "photoshop", "branding"]);
        let mut prev = match_score("x", &keywords, 0);
        for text in [
            "a designer",
            "a designer with photoshop",
            "a designer with photoshop and branding work",
        ] {
            let score = match_score(text, &keywords, 0);
            assert!(score >= prev, "score dropped at {text:?}");
            prev = score;
        }
    }

    #[test]
    fn test_skill_bonus_is_flat_and_double_counts() {
        // A skill that is also a literal keyword earns both bonuses; the
        // terms are deliberately not merged.
        let keywords = kw(&["photoshop"]);
        let score = match_score("photoshop expert", &keywords, 1);
        assert_eq!(score, BASE_SCORE + KEYWORD_BONUS + SKILL_BONUS);
    }

    #[test]
    fn test_market_bonuses_stack() {
        let score = match_score("designer in cairo serving gulf clients", &[], 0);
        assert_eq!(
            score,
            BASE_SCORE + PRIMARY_MARKET_BONUS + SECONDARY_MARKET_BONUS
        );
    }

    #[test]
    fn test_employer_alias_bonus() {
        let score = match_score("previously at vodafone", &[], 0);
        assert_eq!(score, BASE_SCORE + EMPLOYER_BONUS);
    }

    #[test]
    fn test_clamped_to_ceiling() {
        let keywords = kw(&["designer", "photoshop", "branding", "egypt", "senior"]);
        let text = "senior designer, photoshop and branding, egypt and gulf, ex-vodafone";
        let score = match_score(text, &keywords, 6);
        assert_eq!(score, SCORE_CEILING);
    }

    #[test]
    fn test_always_within_bounds() {
        for text in ["", "plain", "egypt gulf vodafone everything"] {
            let score = match_score(text, &kw(&["a", "b", "c", "d", "e"]), 10);
            assert!((0..=99).contains(&score));
        }
    }

    #[test]
    fn test_matched_keywords_reports_hits_only() {
        let keywords = kw(&["designer", "photoshop"]);
        let found = matched_keywords("a designer profile", &keywords);
        assert_eq!(found, vec!["designer".to_string()]);
    }
}
