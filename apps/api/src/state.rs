use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::sourcing::search::SearchProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Pluggable external search backend. HTTP-backed in production,
    /// swapped for a canned provider in tests.
    pub search: Arc<dyn SearchProvider>,
}
