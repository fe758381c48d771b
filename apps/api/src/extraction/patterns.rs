//! Literal-to-pattern utilities shared by every keyword-matching rule.
//!
//! Skill and tool names routinely contain regex metacharacters ("C#",
//! "Node.js", "C++"). Every call site that turns a business keyword into a
//! text predicate goes through here so the escaping is derived exactly once.

use regex::Regex;

/// Compiles a case-insensitive pattern that matches `keyword` as a literal
/// substring. Escaped input can never produce an invalid pattern.
pub fn literal_pattern(keyword: &str) -> Regex {
    Regex::new(&format!("(?i){}", regex::escape(keyword))).unwrap()
}

/// Case-insensitive literal containment test.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    literal_pattern(keyword).is_match(text)
}

/// Returns the entries of `keywords` found in `text`, in table order,
/// stopping once `cap` entries have matched.
pub fn matched_keywords<'a>(text: &str, keywords: &[&'a str], cap: usize) -> Vec<&'a str> {
    keywords
        .iter()
        .filter(|kw| contains_keyword(text, kw))
        .take(cap)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keyword_matches_case_insensitively() {
        assert!(contains_keyword("Expert in photoshop and more", "Photoshop"));
        assert!(!contains_keyword("Expert in Illustrator", "Photoshop"));
    }

    #[test]
    fn test_hash_and_plus_are_literal() {
        assert!(contains_keyword("5 years of C# development", "C#"));
        assert!(contains_keyword("modern C++ services", "C++"));
        // "C#" must not degrade into "C" followed by anything.
        assert!(!contains_keyword("Clojure and Haskell", "C#"));
        assert!(!contains_keyword("Cobol on mainframes", "C++"));
    }

    #[test]
    fn test_dot_is_literal() {
        assert!(contains_keyword("Backend in Node.js", "Node.js"));
        assert!(!contains_keyword("Backend in Nodexjs? no: nodeXjs", "Node.js"));
    }

    #[test]
    fn test_parentheses_are_literal() {
        assert!(contains_keyword("worked on CI (Jenkins) daily", "(Jenkins)"));
    }

    #[test]
    fn test_matched_keywords_preserves_table_order_and_cap() {
        let table = ["React", "Vue", "Angular", "Svelte"];
        let text = "Svelte and Angular and React";
        assert_eq!(matched_keywords(text, &table, 2), vec!["React", "Angular"]);
    }
}
