//! Mock Fallback Generator — plausible synthetic candidates for thin runs.
//!
//! When fewer than three real candidates come back across all platforms, the
//! review queue is topped up from a fixed archetype template set so the end
//! user never sees a hard failure for an upstream outage. Synthetic scores
//! cap at 95 — deliberately below the real-match ceiling of 99 — and their
//! fabricated identity keys carry a timestamp + index suffix so they never
//! collide with real or previously synthesized rows.

use chrono::Utc;

use crate::models::candidate::{CandidateDraft, Provenance, SkillEntry};
use crate::sourcing::keywords::ANCHOR_REGION_PRIMARY;

const MOCK_BASE_SCORE: i32 = 60;
const MOCK_KEYWORD_BONUS: i32 = 5;
const MOCK_SCORE_CEILING: i32 = 95;

struct Archetype {
    /// JD phrases that select this archetype.
    triggers: &'static [&'static str],
    templates: &'static [MockTemplate],
}

struct MockTemplate {
    name: &'static str,
    slug: &'static str,
    title: &'static str,
    skills: &'static [&'static str],
    years: i32,
}

const ARCHETYPES: &[Archetype] = &[
    Archetype {
        triggers: &["frontend", "front-end", "react", "angular", "vue", "javascript"],
        templates: &[
            MockTemplate {
                name: "Ahmed Mostafa",
                slug: "ahmed-mostafa-fe",
                title: "Frontend Developer",
                skills: &["React", "TypeScript", "JavaScript"],
                years: 4,
            },
            MockTemplate {
                name: "Nour El-Sayed",
                slug: "nour-elsayed-fe",
                title: "Senior Frontend Developer",
                skills: &["Angular", "TypeScript"],
                years: 6,
            },
            MockTemplate {
                name: "Karim Fathy",
                slug: "karim-fathy-fe",
                title: "UI Engineer",
                skills: &["Vue", "JavaScript", "Figma"],
                years: 3,
            },
        ],
    },
    Archetype {
        triggers: &["backend", "back-end", "node", "java", "python", "api", "microservice"],
        templates: &[
            MockTemplate {
                name: "Omar Khaled",
                slug: "omar-khaled-be",
                title: "Backend Developer",
                skills: &["Node.js", "PostgreSQL"],
                years: 5,
            },
            MockTemplate {
                name: "Salma Ibrahim",
                slug: "salma-ibrahim-be",
                title: "Senior Backend Engineer",
                skills: &["Java", "SQL", "AWS"],
                years: 7,
            },
            MockTemplate {
                name: "Youssef Adel",
                slug: "youssef-adel-be",
                title: "Software Engineer",
                skills: &["Python", "MongoDB"],
                years: 4,
            },
        ],
    },
    Archetype {
        triggers: &["design", "photoshop", "illustrator", "creative", "ui", "ux", "brand"],
        templates: &[
            MockTemplate {
                name: "Mariam Hassan",
                slug: "mariam-hassan-ds",
                title: "Graphic Designer",
                skills: &["Photoshop", "Illustrator", "InDesign"],
                years: 5,
            },
            MockTemplate {
                name: "Laila Mansour",
                slug: "laila-mansour-ds",
                title: "Art Director",
                skills: &["Photoshop", "After Effects"],
                years: 8,
            },
            MockTemplate {
                name: "Hany Samir",
                slug: "hany-samir-ds",
                title: "UI/UX Designer",
                skills: &["Figma", "Sketch"],
                years: 4,
            },
        ],
    },
    Archetype {
        triggers: &["data", "analytics", "analyst", "machine learning", "sql", "bi"],
        templates: &[
            MockTemplate {
                name: "Dina Farouk",
                slug: "dina-farouk-da",
                title: "Data Analyst",
                skills: &["SQL", "Python", "Power BI"],
                years: 4,
            },
            MockTemplate {
                name: "Mohamed Ashraf",
                slug: "mohamed-ashraf-da",
                title: "Data Scientist",
                skills: &["Python", "SQL"],
                years: 6,
            },
        ],
    },
    // Generic archetype: empty trigger list, selected when nothing matches.
    Archetype {
        triggers: &[],
        templates: &[
            MockTemplate {
                name: "Amr Tarek",
                slug: "amr-tarek-gn",
                title: "Professional",
                skills: &["Excel"],
                years: 5,
            },
            MockTemplate {
                name: "Heba Nabil",
                slug: "heba-nabil-gn",
                title: "Project Manager",
                skills: &["Jira", "Excel"],
                years: 7,
            },
            MockTemplate {
                name: "Tamer Lotfy",
                slug: "tamer-lotfy-gn",
                title: "Operations Specialist",
                skills: &["Excel", "SQL"],
                years: 4,
            },
        ],
    },
];

/// Synthesizes up to `needed` candidates, capped at the selected archetype's
/// template pool size.
pub fn generate_mocks(job_description: &str, needed: usize) -> Vec<CandidateDraft> {
    let lower = job_description.to_lowercase();
    let archetype = ARCHETYPES
        .iter()
        .find(|a| a.triggers.iter().any(|t| lower.contains(t)))
        .unwrap_or_else(|| ARCHETYPES.last().expect("generic archetype exists"));

    let timestamp = Utc::now().timestamp();

    archetype
        .templates
        .iter()
        .take(needed)
        .enumerate()
        .map(|(index, template)| synthesize(template, &lower, timestamp, index))
        .collect()
}

fn synthesize(
    template: &MockTemplate,
    jd_lower: &str,
    timestamp: i64,
    index: usize,
) -> CandidateDraft {
    let matched: Vec<&str> = template
        .skills
        .iter()
        .filter(|s| jd_lower.contains(&s.to_lowercase()))
        .copied()
        .collect();
    let score =
        (MOCK_BASE_SCORE + matched.len() as i32 * MOCK_KEYWORD_BONUS).min(MOCK_SCORE_CEILING);

    let profile_url = format!(
        "https://www.linkedin.com/in/{}-{}-{}",
        template.slug, timestamp, index
    );

    CandidateDraft {
        full_name: template.name.to_string(),
        title: template.title.to_string(),
        location: ANCHOR_REGION_PRIMARY.to_string(),
        years_experience: template.years,
        email: String::new(),
        phone: String::new(),
        profile_url: profile_url.clone(),
        portfolio_url: String::new(),
        skills: template.skills.iter().map(|s| SkillEntry::new(*s)).collect(),
        tools: vec![],
        work_history: vec![],
        provenance: Provenance::Synthetic,
        match_score: score,
        match_reason: if matched.is_empty() {
            "Synthetic placeholder profile (low search yield)".to_string()
        } else {
            format!(
                "Synthetic placeholder profile — template skills in demand: {}",
                matched.join(", ")
            )
        },
        dedup_key: profile_url,
    }
}
