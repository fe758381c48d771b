pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidate_handlers;
use crate::sourcing::handlers as sourcing_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate API: upload, batch ingest, enrichment, main pool
        .route(
            "/api/v1/candidates",
            get(candidate_handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/upload",
            post(candidate_handlers::handle_upload),
        )
        .route(
            "/api/v1/candidates/batch",
            post(candidate_handlers::handle_batch),
        )
        .route(
            "/api/v1/candidates/:id/enrich",
            post(candidate_handlers::handle_enrich),
        )
        // Sourcing API: run pipeline, review staging area
        .route(
            "/api/v1/sourcing/run",
            post(sourcing_handlers::handle_run_sourcing),
        )
        .route(
            "/api/v1/sourcing/staged",
            get(sourcing_handlers::handle_list_staged),
        )
        .route(
            "/api/v1/sourcing/staged/:id/approve",
            post(sourcing_handlers::handle_approve),
        )
        .route(
            "/api/v1/sourcing/staged/:id/reject",
            post(sourcing_handlers::handle_reject),
        )
        .with_state(state)
}
