use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where a candidate record originated. Persisted as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Upload,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Behance,
    Wuzzuf,
    Synthetic,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Upload => "upload",
            Provenance::LinkedIn => "linkedin",
            Provenance::Behance => "behance",
            Provenance::Wuzzuf => "wuzzuf",
            Provenance::Synthetic => "synthetic",
        }
    }

    /// Provenance tags cleared at the start of every sourcing run.
    pub fn sourced_tags() -> [&'static str; 4] {
        ["linkedin", "behance", "wuzzuf", "synthetic"]
    }
}

/// Candidate lifecycle. Staged (unvetted) rows live in `staged_candidates`;
/// approval moves them into `candidates` and deletes the staged copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    New,
    Vetted,
    PipelineStaged,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Vetted => "vetted",
            CandidateStatus::PipelineStaged => "pipeline_staged",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }
}

/// A detected skill or tool with an estimated years-used figure (default 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub years: u32,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            years: 1,
        }
    }
}

/// One detected employment span. Company/title separation is not attempted;
/// `title` carries the surrounding free-text context and `company` stays
/// "Unknown" until a human fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub company: String,
    pub title: String,
    pub years: u32,
}

/// A fully populated candidate ready for insertion, produced by the result
/// parser, the mock generator, or the upload path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDraft {
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub years_experience: i32,
    pub email: String,
    pub phone: String,
    pub profile_url: String,
    pub portfolio_url: String,
    pub skills: Vec<SkillEntry>,
    pub tools: Vec<SkillEntry>,
    pub work_history: Vec<WorkHistoryEntry>,
    pub provenance: Provenance,
    pub match_score: i32,
    pub match_reason: String,
    pub dedup_key: String,
}

impl CandidateDraft {
    /// Identity key in priority order: profile URL, portfolio URL, email.
    pub fn identity_key(&self) -> Option<&str> {
        [&self.profile_url, &self.portfolio_url, &self.email]
            .into_iter()
            .find(|v| !v.is_empty())
            .map(String::as_str)
    }
}

/// Main-pool candidate row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub years_experience: i32,
    pub email: String,
    pub phone: String,
    pub profile_url: String,
    pub portfolio_url: String,
    pub skills: serde_json::Value,
    pub tools: serde_json::Value,
    pub work_history: serde_json::Value,
    pub provenance: String,
    pub match_score: i32,
    pub match_reason: String,
    pub status: String,
    pub resume_text: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Staging-area row awaiting human approval or rejection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StagedCandidateRow {
    pub id: Uuid,
    pub dedup_key: String,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub years_experience: i32,
    pub email: String,
    pub phone: String,
    pub profile_url: String,
    pub portfolio_url: String,
    pub skills: serde_json::Value,
    pub tools: serde_json::Value,
    pub work_history: serde_json::Value,
    pub provenance: String,
    pub match_score: i32,
    pub match_reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
