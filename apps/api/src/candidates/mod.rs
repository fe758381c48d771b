// Candidate persistence and the document-driven entry points: PDF upload,
// batch text ingest, and post-hoc enrichment of stored résumé text.

pub mod handlers;
pub mod store;

/// Fixed score for document-parsed candidates pending human vetting.
/// Deliberately low so uploads sort below scored, sourced candidates.
pub const UPLOAD_REVIEW_SCORE: i32 = 35;
