//! JD Analyzer — turns a free-text job description into a canonical role
//! label, ranked skills, employers of interest, market terms, and up to five
//! keyword combinations used as literal search queries.
//!
//! Business rules are ordered literal-string tables, checked in priority
//! order. Table order is load-bearing: a more specific role ("Art Director")
//! must win over a generic one it would otherwise tie with.

use crate::extraction::patterns::contains_keyword;

/// Fixed geographic market the business sources for. Always present in
/// generated combinations and used as the default sourced-candidate location.
pub const ANCHOR_REGION_PRIMARY: &str = "Egypt";
pub const ANCHOR_REGION_SECONDARY: &str = "Cairo";

/// Fallback terms when a combination slot has nothing better to offer.
const GENERIC_QUALIFIERS: [&str; 2] = ["experienced", "hiring"];

const MAX_COMBINATIONS: usize = 5;
const MAX_SKILLS: usize = 5;

/// Ordered role table: first role with any trigger phrase present wins.
const ROLE_TRIGGERS: &[(&str, &[&str])] = &[
    ("Art Director", &["art director"]),
    ("Creative Director", &["creative director"]),
    (
        "Graphic Designer",
        &["graphic designer", "graphic design", "visual designer"],
    ),
    (
        "UI/UX Designer",
        &["ui/ux", "ui designer", "ux designer", "product designer"],
    ),
    ("Motion Designer", &["motion designer", "motion graphics"]),
    (
        "Frontend Developer",
        &["frontend", "front-end", "react developer", "angular developer"],
    ),
    (
        "Backend Developer",
        &["backend", "back-end", "node.js developer", "java developer"],
    ),
    ("Full Stack Developer", &["full stack", "full-stack"]),
    (
        "Mobile Developer",
        &["mobile developer", "flutter developer", "ios developer", "android developer"],
    ),
    ("DevOps Engineer", &["devops", "site reliability"]),
    ("Data Scientist", &["data scientist", "machine learning"]),
    (
        "Data Analyst",
        &["data analyst", "data analytics", "business intelligence"],
    ),
    ("Software Engineer", &["software engineer", "software developer"]),
];

const DEFAULT_ROLE: &str = "Professional";

/// Closed skill list for JD analysis (exact names, literal containment).
const JD_SKILLS: &[&str] = &[
    "Photoshop",
    "Illustrator",
    "InDesign",
    "After Effects",
    "Figma",
    "Sketch",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Python",
    "Java",
    "C#",
    "SQL",
    "AWS",
    "Flutter",
];

/// Phrases that imply skills without naming them.
const SKILL_ALIASES: &[(&str, &[&str])] = &[
    (
        "adobe creative suite",
        &["Photoshop", "Illustrator", "InDesign", "After Effects"],
    ),
    (
        "adobe cc",
        &["Photoshop", "Illustrator", "InDesign", "After Effects"],
    ),
    ("mern", &["React", "Node.js"]),
    ("mean stack", &["Angular", "Node.js"]),
];

/// Notable employers, ordered. Matches are collected in this table order
/// (not input order), yielding a primary and secondary company.
const NOTABLE_EMPLOYERS: &[(&str, &[&str])] = &[
    ("Vodafone International Services", &["vodafone"]),
    ("Valeo", &["valeo"]),
    ("IBM Egypt", &["ibm"]),
    ("Orange Business", &["orange business", "orange egypt"]),
    ("Dell Technologies", &["dell"]),
];

/// Market/region signal phrases. These become extra keywords, never the
/// location field — location is always anchored to the target region.
const MARKET_TERMS: &[&str] = &[
    "Gulf",
    "GCC",
    "UAE",
    "Dubai",
    "Abu Dhabi",
    "Saudi",
    "Riyadh",
    "Jeddah",
    "Qatar",
    "Doha",
    "Kuwait",
    "Bahrain",
    "Oman",
];

/// Structured signals pulled from one job description.
#[derive(Debug, Clone, PartialEq)]
pub struct JdProfile {
    pub role: String,
    pub skills: Vec<String>,
    pub companies: Vec<String>,
    pub market_terms: Vec<String>,
}

/// Analyzes a job description. Callers enforce the 20-character minimum;
/// this function never fails, it only degrades to generic output.
pub fn analyze_jd(text: &str) -> JdProfile {
    let lower = text.to_lowercase();

    let role = ROLE_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(role, _)| role.to_string())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    // Exact skill hits first, alias-implied hits appended if absent.
    let mut skills: Vec<String> = JD_SKILLS
        .iter()
        .filter(|s| contains_keyword(text, s))
        .map(|s| s.to_string())
        .collect();
    for (alias, implied) in SKILL_ALIASES {
        if lower.contains(alias) {
            for skill in *implied {
                if !skills.iter().any(|s| s == skill) {
                    skills.push(skill.to_string());
                }
            }
        }
    }
    skills.truncate(MAX_SKILLS);

    let companies: Vec<String> = NOTABLE_EMPLOYERS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(name, _)| name.to_string())
        .collect();

    let market_terms: Vec<String> = MARKET_TERMS
        .iter()
        .filter(|t| contains_keyword(text, t))
        .map(|t| t.to_string())
        .collect();

    JdProfile {
        role,
        skills,
        companies,
        market_terms,
    }
}

/// Builds up to five keyword combinations, most targeted first. Each slot is
/// an ordered fallback chain evaluated until one generator yields terms, so
/// the output is never empty even for a terse, generic job description.
pub fn build_combinations(profile: &JdProfile) -> Vec<Vec<String>> {
    let role = profile.role.as_str();
    let company1 = profile.companies.first().map(String::as_str);
    let company2 = profile.companies.get(1).map(String::as_str);
    let market1 = profile.market_terms.first().map(String::as_str);
    let market2 = profile.market_terms.get(1).map(String::as_str);
    let skill1 = profile.skills.first().map(String::as_str);
    let skill2 = profile.skills.get(1).map(String::as_str);

    // 1: role + anchor-1 + (primary company | market term | nothing)
    let mut combo1 = vec![role.to_string(), ANCHOR_REGION_PRIMARY.to_string()];
    if let Some(term) = company1.or(market1) {
        combo1.push(term.to_string());
    }

    // 2: role + anchor-1 + (secondary company | 2nd market | top skill | qualifier)
    let combo2 = vec![
        role.to_string(),
        ANCHOR_REGION_PRIMARY.to_string(),
        company2
            .or(market2)
            .or(skill1)
            .unwrap_or(GENERIC_QUALIFIERS[0])
            .to_string(),
    ];

    // 3: role + anchor-2 + (primary company | market term | nothing)
    let mut combo3 = vec![role.to_string(), ANCHOR_REGION_SECONDARY.to_string()];
    if let Some(term) = company1.or(market1) {
        combo3.push(term.to_string());
    }

    // 4: role + top skill + anchor-1, else role + primary company + anchor-1,
    //    else role + anchor-1 + qualifier
    let combo4_chain: [&dyn Fn() -> Option<Vec<String>>; 3] = [
        &|| skill1.map(|s| vec![role.to_string(), s.to_string(), ANCHOR_REGION_PRIMARY.to_string()]),
        &|| company1.map(|c| vec![role.to_string(), c.to_string(), ANCHOR_REGION_PRIMARY.to_string()]),
        &|| {
            Some(vec![
                role.to_string(),
                ANCHOR_REGION_PRIMARY.to_string(),
                GENERIC_QUALIFIERS[0].to_string(),
            ])
        },
    ];
    let combo4 = first_yield(&combo4_chain);

    // 5: primary company + anchor-1 + market term, else primary company +
    //    anchor-1, else top-two skills + anchor-1, else role + anchor-1 +
    //    generic qualifiers
    let combo5_chain: [&dyn Fn() -> Option<Vec<String>>; 4] = [
        &|| match (company1, market1) {
            (Some(c), Some(m)) => Some(vec![
                c.to_string(),
                ANCHOR_REGION_PRIMARY.to_string(),
                m.to_string(),
            ]),
            _ => None,
        },
        &|| company1.map(|c| vec![c.to_string(), ANCHOR_REGION_PRIMARY.to_string()]),
        &|| match (skill1, skill2) {
            (Some(a), Some(b)) => Some(vec![
                a.to_string(),
                b.to_string(),
                ANCHOR_REGION_PRIMARY.to_string(),
            ]),
            _ => None,
        },
        &|| {
            Some(vec![
                role.to_string(),
                ANCHOR_REGION_PRIMARY.to_string(),
                GENERIC_QUALIFIERS[0].to_string(),
                GENERIC_QUALIFIERS[1].to_string(),
            ])
        },
    ];
    let combo5 = first_yield(&combo5_chain);

    let mut combinations = vec![combo1, combo2, combo3];
    if let Some(c) = combo4 {
        combinations.push(c);
    }
    if let Some(c) = combo5 {
        combinations.push(c);
    }

    // Identical fallbacks collapse for terse JDs; keep the first occurrence.
    let mut seen = Vec::new();
    combinations.retain(|c| {
        if seen.contains(c) {
            false
        } else {
            seen.push(c.clone());
            true
        }
    });
    combinations.truncate(MAX_COMBINATIONS);
    combinations
}

/// Evaluates an ordered chain of generators, returning the first non-empty
/// yield. Keeps each fallback tier independently testable instead of nesting
/// conditionals five levels deep.
fn first_yield(chain: &[&dyn Fn() -> Option<Vec<String>>]) -> Option<Vec<String>> {
    chain.iter().find_map(|generator| {
        generator().filter(|terms| !terms.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESIGN_JD: &str = "Senior Graphic Designer needed, must know Photoshop, \
        Illustrator, based in Cairo, Vodafone International experience a plus";

    #[test]
    fn test_role_inference_default() {
        let profile = analyze_jd("we need somebody who can do many things well");
        assert_eq!(profile.role, "Professional");
    }

    #[test]
    fn test_role_order_is_significant() {
        // Both roles present: the first-listed one must win.
        let profile = analyze_jd("seeking an art director / graphic designer hybrid");
        assert_eq!(profile.role, "Art Director");
    }

    #[test]
    fn test_design_jd_role_is_graphic_designer() {
        let profile = analyze_jd(DESIGN_JD);
        assert_eq!(profile.role, "Graphic Designer");
    }

    #[test]
    fn test_design_jd_skills_and_company() {
        let profile = analyze_jd(DESIGN_JD);
        assert!(profile.skills.contains(&"Photoshop".to_string()));
        assert!(profile.skills.contains(&"Illustrator".to_string()));
        assert_eq!(
            profile.companies.first().map(String::as_str),
            Some("Vodafone International Services")
        );
    }

    #[test]
    fn test_alias_implies_adobe_skills() {
        let profile = analyze_jd("must be fluent in the Adobe Creative Suite toolchain");
        assert!(profile.skills.contains(&"Photoshop".to_string()));
        assert!(profile.skills.contains(&"InDesign".to_string()));
    }

    #[test]
    fn test_alias_does_not_duplicate_exact_hits() {
        let profile = analyze_jd("Photoshop plus the rest of the adobe creative suite");
        let photoshop_count = profile.skills.iter().filter(|s| *s == "Photoshop").count();
        assert_eq!(photoshop_count, 1);
    }

    #[test]
    fn test_skills_capped_at_five() {
        let profile =
            analyze_jd("Photoshop Illustrator InDesign Figma Sketch React Angular Vue expert");
        assert_eq!(profile.skills.len(), 5);
    }

    #[test]
    fn test_market_terms_collected_not_location() {
        let profile = analyze_jd("designer for GCC and Dubai clients, gulf market exposure");
        assert!(profile.market_terms.contains(&"GCC".to_string()));
        assert!(profile.market_terms.contains(&"Dubai".to_string()));
    }

    #[test]
    fn test_combination_one_role_anchor_company() {
        let profile = analyze_jd(DESIGN_JD);
        let combos = build_combinations(&profile);
        assert_eq!(
            combos[0],
            vec![
                "Graphic Designer".to_string(),
                "Egypt".to_string(),
                "Vodafone International Services".to_string()
            ]
        );
    }

    #[test]
    fn test_combinations_bounds_for_any_jd() {
        for jd in [
            DESIGN_JD,
            "a terse and entirely generic description",
            "backend developer with node.js for gulf fintech, IBM background",
        ] {
            let combos = build_combinations(&analyze_jd(jd));
            assert!(!combos.is_empty() && combos.len() <= 5, "jd: {jd}");
            for combo in &combos {
                assert!((2..=4).contains(&combo.len()), "combo: {combo:?}");
                assert!(
                    combo.iter().any(|t| t == "Egypt" || t == "Cairo"),
                    "combo missing anchor: {combo:?}"
                );
            }
        }
    }

    #[test]
    fn test_terse_jd_falls_back_to_generic_qualifiers() {
        let combos = build_combinations(&analyze_jd("a terse and entirely generic description"));
        // No company, no skill, no market term: every slot bottoms out on
        // role + anchor (+ qualifiers), and duplicates collapse.
        assert!(combos
            .iter()
            .all(|c| c[0] == "Professional" || c.contains(&"Professional".to_string())));
        assert!(combos.iter().any(|c| c.contains(&"experienced".to_string())));
    }

    #[test]
    fn test_first_yield_skips_empty_generators() {
        let chain: [&dyn Fn() -> Option<Vec<String>>; 3] = [
            &|| None,
            &|| Some(vec![]),
            &|| Some(vec!["hit".to_string()]),
        ];
        assert_eq!(first_yield(&chain), Some(vec!["hit".to_string()]));
    }
}
