use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::store;
use crate::errors::AppError;
use crate::models::candidate::StagedCandidateRow;
use crate::sourcing::{run_sourcing, SourcingSummary, DEFAULT_RESULT_LIMIT, MIN_JD_LEN};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SourcingRequest {
    pub job_description: String,
    pub limit: Option<usize>,
}

/// POST /api/v1/sourcing/run
pub async fn handle_run_sourcing(
    State(state): State<AppState>,
    Json(req): Json<SourcingRequest>,
) -> Result<Json<SourcingSummary>, AppError> {
    if req.job_description.trim().len() < MIN_JD_LEN {
        return Err(AppError::Validation(format!(
            "job_description must be at least {MIN_JD_LEN} characters"
        )));
    }
    let limit = req.limit.unwrap_or(DEFAULT_RESULT_LIMIT);
    let summary = run_sourcing(&state, &req.job_description, limit).await?;
    Ok(Json(summary))
}

/// GET /api/v1/sourcing/staged
pub async fn handle_list_staged(
    State(state): State<AppState>,
) -> Result<Json<Vec<StagedCandidateRow>>, AppError> {
    let staged = store::list_staged(&state.db).await?;
    Ok(Json(staged))
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub candidate_id: Uuid,
}

/// POST /api/v1/sourcing/staged/:id/approve
/// Moves the staged candidate into the main pool and deletes the staged copy.
pub async fn handle_approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApproveResponse>, AppError> {
    let candidate_id = store::approve_staged(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staged candidate {id} not found")))?;
    Ok(Json(ApproveResponse { candidate_id }))
}

/// POST /api/v1/sourcing/staged/:id/reject
/// Deletes the staged copy; nothing is promoted.
pub async fn handle_reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_staged(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Staged candidate {id} not found"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
