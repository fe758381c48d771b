//! Deduplicator / upsert gate for one sourcing run.
//!
//! Two layers: a request-scoped seen-set (owned by the orchestrator, never
//! global, so independent runs are safe to execute concurrently) that catches
//! repeats within the batch without a round-trip, and a uniqueness constraint
//! on `staged_candidates.dedup_key` that closes the look-then-insert race
//! between concurrent runs — a constraint hit is a skip, not a failure.

use std::collections::HashSet;

use sqlx::PgPool;

/// In-memory identity keys observed during a single sourcing run.
#[derive(Debug, Default)]
pub struct SeenKeys {
    keys: HashSet<String>,
}

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as seen. Returns `false` when the key was already seen in
    /// this run, meaning the caller should skip the candidate.
    pub fn mark(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Existence check against the staging table. Rows left over from a prior
/// run keep their identity keys, so re-running sourcing never duplicates.
pub async fn is_already_staged(pool: &PgPool, dedup_key: &str) -> Result<bool, sqlx::Error> {
    let existing: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM staged_candidates WHERE dedup_key = $1")
            .bind(dedup_key)
            .fetch_optional(pool)
            .await?;
    Ok(existing.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mark_accepts_repeat_rejects() {
        let mut seen = SeenKeys::new();
        assert!(seen.mark("https://www.linkedin.com/in/jane-doe"));
        assert!(!seen.mark("https://www.linkedin.com/in/jane-doe"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_distinct_keys_both_accepted() {
        let mut seen = SeenKeys::new();
        assert!(seen.mark("https://www.linkedin.com/in/a"));
        assert!(seen.mark("https://www.behance.net/b"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_starts_empty() {
        assert!(SeenKeys::new().is_empty());
    }
}
