//! Candidate storage queries. The staging table carries a uniqueness
//! constraint on `dedup_key`; inserts go through `ON CONFLICT DO NOTHING` so
//! concurrent sourcing runs skip duplicates instead of failing.

use sqlx::PgPool;
use uuid::Uuid;

use crate::extraction::fields::ExtractedFields;
use crate::models::candidate::{
    CandidateDraft, CandidateRow, CandidateStatus, Provenance, StagedCandidateRow,
};

/// Inserts a sourced draft into the staging area. Returns `false` when a row
/// with the same identity key already exists (constraint hit — skipped).
pub async fn insert_staged(pool: &PgPool, draft: &CandidateDraft) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        INSERT INTO staged_candidates
            (id, dedup_key, full_name, title, location, years_experience,
             email, phone, profile_url, portfolio_url, skills, tools,
             work_history, provenance, match_score, match_reason, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        ON CONFLICT (dedup_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&draft.dedup_key)
    .bind(&draft.full_name)
    .bind(&draft.title)
    .bind(&draft.location)
    .bind(draft.years_experience)
    .bind(&draft.email)
    .bind(&draft.phone)
    .bind(&draft.profile_url)
    .bind(&draft.portfolio_url)
    .bind(serde_json::to_value(&draft.skills).unwrap_or_default())
    .bind(serde_json::to_value(&draft.tools).unwrap_or_default())
    .bind(serde_json::to_value(&draft.work_history).unwrap_or_default())
    .bind(draft.provenance.as_str())
    .bind(draft.match_score)
    .bind(&draft.match_reason)
    .bind(CandidateStatus::New.as_str())
    .execute(pool)
    .await?
    .rows_affected();

    Ok(rows > 0)
}

/// Bulk-deletes staged rows for the given provenance tags. Runs unscoped at
/// the start of every sourcing pass; readers may observe a transient empty
/// staging list while a run is in flight.
pub async fn clear_staged_by_provenance(
    pool: &PgPool,
    tags: &[&str],
) -> Result<u64, sqlx::Error> {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    let rows = sqlx::query("DELETE FROM staged_candidates WHERE provenance = ANY($1)")
        .bind(&tags)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

pub async fn list_staged(pool: &PgPool) -> Result<Vec<StagedCandidateRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM staged_candidates ORDER BY match_score DESC, created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn delete_staged(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM staged_candidates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}

/// Promotes a staged candidate into the main pool as vetted and deletes the
/// staged copy. Returns the new main-pool id, or `None` if the staged row
/// was already gone. Runs in one transaction: the delete takes the row lock,
/// so two concurrent approvals of the same row promote it exactly once.
pub async fn approve_staged(pool: &PgPool, staged_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let staged: Option<StagedCandidateRow> =
        sqlx::query_as("DELETE FROM staged_candidates WHERE id = $1 RETURNING *")
            .bind(staged_id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(row) = staged else {
        tx.rollback().await?;
        return Ok(None);
    };

    let candidate_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO candidates
            (id, full_name, title, location, years_experience, email, phone,
             profile_url, portfolio_url, skills, tools, work_history,
             provenance, match_score, match_reason, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#,
    )
    .bind(candidate_id)
    .bind(&row.full_name)
    .bind(&row.title)
    .bind(&row.location)
    .bind(row.years_experience)
    .bind(&row.email)
    .bind(&row.phone)
    .bind(&row.profile_url)
    .bind(&row.portfolio_url)
    .bind(&row.skills)
    .bind(&row.tools)
    .bind(&row.work_history)
    .bind(&row.provenance)
    .bind(row.match_score)
    .bind(&row.match_reason)
    .bind(CandidateStatus::Vetted.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Some(candidate_id))
}

/// Inserts a document-parsed candidate into the main pool. The raw résumé
/// text is retained for later enrichment passes.
pub async fn insert_uploaded(
    pool: &PgPool,
    fields: &ExtractedFields,
    match_score: i32,
    resume_text: &str,
    resume_url: Option<&str>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO candidates
            (id, full_name, title, location, years_experience, email, phone,
             profile_url, portfolio_url, skills, tools, work_history,
             provenance, match_score, match_reason, status, resume_text, resume_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, 'Pending human review', $15, $16, $17)
        "#,
    )
    .bind(id)
    .bind(&fields.full_name)
    .bind(&fields.title)
    .bind(&fields.location)
    .bind(fields.years_experience)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.profile_url)
    .bind(&fields.portfolio_url)
    .bind(serde_json::to_value(&fields.skills).unwrap_or_default())
    .bind(serde_json::to_value(&fields.tools).unwrap_or_default())
    .bind(serde_json::to_value(&fields.work_history).unwrap_or_default())
    .bind(Provenance::Upload.as_str())
    .bind(match_score)
    .bind(CandidateStatus::New.as_str())
    .bind(resume_text)
    .bind(resume_url)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM candidates ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Backfills the structured list fields in place. Status and score are left
/// untouched — enrichment never re-vets a candidate.
pub async fn update_enrichment(
    pool: &PgPool,
    id: Uuid,
    skills: serde_json::Value,
    tools: serde_json::Value,
    work_history: serde_json::Value,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE candidates SET skills = $1, tools = $2, work_history = $3 WHERE id = $4",
    )
    .bind(skills)
    .bind(tools)
    .bind(work_history)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(rows)
}
