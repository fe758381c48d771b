// Sourcing pipeline: JD analysis → per-platform external search → result
// parsing → scoring → dedup → staging inserts, with a synthetic fallback
// when the real yield is too thin for review.

pub mod dedup;
pub mod handlers;
pub mod keywords;
pub mod mock;
pub mod results;
pub mod scoring;
pub mod search;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::candidates::store;
use crate::errors::AppError;
use crate::models::candidate::Provenance;
use crate::sourcing::dedup::SeenKeys;
use crate::sourcing::results::{parse_result, Platform};
use crate::state::AppState;

/// Callers must supply at least this much job-description text.
pub const MIN_JD_LEN: usize = 20;
/// Default overall result limit per sourcing run.
pub const DEFAULT_RESULT_LIMIT: usize = 10;
/// Below this many real candidates, the mock fallback tops up the queue.
const MOCK_TRIGGER_FLOOR: usize = 3;

#[derive(Debug, Serialize)]
pub struct PlatformOutcome {
    pub platform: &'static str,
    pub query: String,
    pub fetched: usize,
    pub staged: usize,
}

#[derive(Debug, Serialize)]
pub struct SourcingSummary {
    pub role: String,
    pub combinations: Vec<Vec<String>>,
    pub platforms: Vec<PlatformOutcome>,
    pub real_count: usize,
    pub mock_count: usize,
    pub total_staged: usize,
    pub cleared_previous: u64,
}

/// Runs one sourcing pass for a job description.
///
/// Platforms are queried sequentially, each with a different keyword
/// combination rotated by platform index. A single platform failure is
/// logged and contributes zero results; processing stops early once `limit`
/// candidates have been staged. The initial bulk delete of previously
/// sourced rows is not isolated from concurrent readers — a client listing
/// the staging area mid-run may observe a transient empty state.
pub async fn run_sourcing(
    state: &AppState,
    job_description: &str,
    limit: usize,
) -> Result<SourcingSummary, AppError> {
    let profile = keywords::analyze_jd(job_description);
    let combinations = keywords::build_combinations(&profile);
    info!(
        "Sourcing run: role '{}', {} keyword combinations",
        profile.role,
        combinations.len()
    );

    let cleared_previous =
        store::clear_staged_by_provenance(&state.db, &Provenance::sourced_tags()).await?;
    if cleared_previous > 0 {
        info!("Cleared {cleared_previous} previously sourced staged candidates");
    }

    // Request-scoped seen-set: identity keys observed in this run only.
    let mut seen = SeenKeys::new();
    let mut platforms = Vec::new();
    let mut real_count = 0usize;

    for (index, platform) in Platform::all().into_iter().enumerate() {
        let combo = &combinations[index % combinations.len()];
        let query = combo.join(" ");

        let results = match state.search.search(&query, platform.site_filter()).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    "{} search failed, continuing with remaining platforms: {e}",
                    platform.label()
                );
                platforms.push(PlatformOutcome {
                    platform: platform.label(),
                    query,
                    fetched: 0,
                    staged: 0,
                });
                continue;
            }
        };

        let fetched = results.len();
        let mut staged = 0usize;

        for result in &results {
            if real_count >= limit {
                break;
            }
            let draft = match parse_result(result, platform, combo) {
                Ok(draft) => draft,
                Err(rejection) => {
                    debug!("Dropped result {}: {rejection}", result.url);
                    continue;
                }
            };
            if !seen.mark(&draft.dedup_key) {
                continue;
            }
            if dedup::is_already_staged(&state.db, &draft.dedup_key).await? {
                continue;
            }
            if store::insert_staged(&state.db, &draft).await? {
                staged += 1;
                real_count += 1;
            }
        }

        info!(
            "{}: fetched {fetched}, staged {staged} (query: {query})",
            platform.label()
        );
        platforms.push(PlatformOutcome {
            platform: platform.label(),
            query,
            fetched,
            staged,
        });

        if real_count >= limit {
            break;
        }
    }

    let mut mock_count = 0usize;
    if real_count < MOCK_TRIGGER_FLOOR {
        let needed = limit.saturating_sub(real_count);
        let mocks = mock::generate_mocks(job_description, needed);
        for draft in &mocks {
            if store::insert_staged(&state.db, draft).await? {
                mock_count += 1;
            }
        }
        info!("Low search yield ({real_count} real), added {mock_count} synthetic candidates");
    }

    info!(
        "Sourcing complete: {real_count} real, {mock_count} synthetic, {} identity keys seen",
        seen.len()
    );

    Ok(SourcingSummary {
        role: profile.role,
        combinations,
        platforms,
        real_count,
        mock_count,
        total_staged: real_count + mock_count,
        cleared_previous,
    })
}
