use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job listing as stored, plus the owning business's display fields resolved
/// through the join. Salary and experience are display strings, not numbers —
/// range filtering over them happens in memory (see `search::predicates`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub business_id: Uuid,
    pub title: String,
    /// Denormalized copy; the business's own name is the fallback.
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub technique: String,
    pub city: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub experience: Option<String>,
    pub is_recommended: bool,
    pub logo_path: Option<String>,
    pub expiry_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Resolved from the owning business (LEFT JOIN).
    pub business_company_name: Option<String>,
    pub business_logo: Option<String>,
}

/// Display projection of a job listing returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub city: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub description: String,
    /// Relative age of the posting ("vừa xong", "3 giờ trước", ...).
    pub posted: String,
    /// Expiry date as dd/mm/yyyy.
    pub expires_on: String,
    pub is_remote: bool,
    pub is_featured: bool,
}

/// Pagination metadata. `total_jobs` is computed from the storage-level
/// pre-filter only, so it overstates the truth whenever salary or experience
/// post-filtering is active — a documented approximation, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_jobs: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// One page of formatted results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<JobSummary>,
    pub pagination: PageMeta,
}

/// Incremental-load variant of a page: the client appends `jobs` and keeps
/// requesting while `has_more` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFeed {
    pub jobs: Vec<JobSummary>,
    pub has_more: bool,
}
