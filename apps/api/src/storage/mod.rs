//! Storage collaborator for job listings.
//!
//! `JobQuery` is the pre-filter: the subset of a search's conditions the
//! store can evaluate itself. Salary/experience intervals are not part of it
//! — they are narrowed in memory by the engine after the fetch.

pub mod pg;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::job::JobRow;

pub use pg::PgJobStore;

/// Location condition of a pre-filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFilter {
    /// Remote/WFH markers across type, city and location.
    Remote,
    /// Substring match against city or location.
    Place(String),
}

/// Storage-expressible subset of a search, anchored at an eligibility
/// instant. Serializes canonically for cache-key derivation; `active_at` is
/// excluded so equal filter inputs within a TTL window share one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobQuery {
    #[serde(skip)]
    pub active_at: DateTime<Utc>,
    /// Case-insensitive substring over title, company name, description and
    /// technique (OR-group).
    pub keyword: Option<String>,
    pub location: Option<LocationFilter>,
    /// Substring match against the employment-type text.
    pub job_type: Option<String>,
    pub featured_only: bool,
}

/// Read-side collaborator the engine fetches candidates from.
///
/// `find_jobs` returns rows newest-first (`created_at` descending, id
/// descending as the tie-break) with the owning business's display fields
/// join-resolved. Both operations are independent reads; the engine
/// dispatches them concurrently.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn count_jobs(&self, query: &JobQuery) -> Result<u64, AppError>;

    async fn find_jobs(
        &self,
        query: &JobQuery,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<JobRow>, AppError>;
}
