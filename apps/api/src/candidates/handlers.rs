use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use aws_sdk_s3::primitives::ByteStream;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::candidates::{store, UPLOAD_REVIEW_SCORE};
use crate::errors::AppError;
use crate::extraction::fields::{extract_fields, SKILLS_CAP};
use crate::extraction::{fields, normalize};
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

/// Default location for document-parsed candidates. Sourced candidates
/// default to the anchor region instead; the two entry points deliberately
/// disagree (global remote hiring vs region-anchored sourcing).
const UPLOAD_DEFAULT_LOCATION: &str = "Remote";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub match_score: i32,
    pub resume_url: String,
}

/// POST /api/v1/candidates/upload
///
/// Multipart PDF upload: store the document, extract fields from its text,
/// create a low-confidence record pending review. A PDF that cannot be
/// decoded still produces a record — every field takes its default and the
/// name falls back to the filename stem.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("could not read file field: {e}")))?;
            file = Some((filename, bytes));
        }
    }
    let (filename, bytes) = file.ok_or_else(|| {
        AppError::Validation("no file provided — expected a 'file' multipart field".to_string())
    })?;

    let resume_url = store_resume(&state, &filename, &bytes).await?;

    let text = normalize::pdf_to_text(&bytes);
    let fallback_name = filename_stem(&filename);
    let fields = extract_fields(&text, &fallback_name, UPLOAD_DEFAULT_LOCATION);

    let id = store::insert_uploaded(&state.db, &fields, UPLOAD_REVIEW_SCORE, &text, Some(&resume_url))
        .await?;
    info!("Uploaded candidate {id} ({})", fields.full_name);

    Ok(Json(UploadResponse {
        id,
        full_name: fields.full_name,
        title: fields.title,
        location: fields.location,
        email: fields.email,
        match_score: UPLOAD_REVIEW_SCORE,
        resume_url,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BatchItem {
    pub text: String,
    #[serde(default)]
    pub fallback_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub inserted: usize,
}

/// POST /api/v1/candidates/batch
///
/// JSON ingest of pre-extracted résumé text blobs. Rows inserted before a
/// failure stay inserted; success reports a count, never a rollback.
pub async fn handle_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if req.items.is_empty() {
        return Err(AppError::Validation("items must not be empty".to_string()));
    }

    let mut inserted = 0usize;
    for (index, item) in req.items.iter().enumerate() {
        let text = normalize::normalize(&item.text);
        let fallback = item
            .fallback_name
            .clone()
            .unwrap_or_else(|| format!("Candidate {}", index + 1));
        let fields = extract_fields(&text, &fallback, UPLOAD_DEFAULT_LOCATION);
        store::insert_uploaded(&state.db, &fields, UPLOAD_REVIEW_SCORE, &text, None).await?;
        inserted += 1;
    }

    Ok(Json(BatchResponse { inserted }))
}

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub id: Uuid,
    pub skills: usize,
    pub tools: usize,
    pub work_history: usize,
}

/// POST /api/v1/candidates/:id/enrich
///
/// Reruns field extraction over the stored résumé text and backfills the
/// structured list fields in place. Status and score do not change.
pub async fn handle_enrich(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrichResponse>, AppError> {
    let candidate = store::get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let text = candidate
        .resume_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!(
                "Candidate {id} has no stored résumé text to enrich from"
            ))
        })?;

    let skills = fields::detect_skills(&text, SKILLS_CAP);
    let tools = fields::detect_tools(&text);
    let work_history = fields::extract_work_history(&text);

    store::update_enrichment(
        &state.db,
        id,
        serde_json::to_value(&skills).unwrap_or_default(),
        serde_json::to_value(&tools).unwrap_or_default(),
        serde_json::to_value(&work_history).unwrap_or_default(),
    )
    .await?;

    Ok(Json(EnrichResponse {
        id,
        skills: skills.len(),
        tools: tools.len(),
        work_history: work_history.len(),
    }))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = store::list_candidates(&state.db).await?;
    Ok(Json(candidates))
}

/// Stores the raw PDF and returns a durable retrieval URL.
async fn store_resume(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let key = format!("resumes/{}/{}", Uuid::new_v4(), filename);
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(bytes.to_vec()))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("S3 upload failed: {e}")))?;

    info!("Stored résumé at s3://{}/{}", state.config.s3_bucket, key);
    Ok(format!(
        "{}/{}/{}",
        state.config.s3_endpoint, state.config.s3_bucket, key
    ))
}

fn filename_stem(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename)
        .trim();
    if stem.is_empty() {
        "Candidate".to_string()
    } else {
        stem.to_string()
    }
}
