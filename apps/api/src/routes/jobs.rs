//! Job listing handlers: thin shims that decode query parameters into a
//! `FilterSpec`, run the engine, and encode the result. Every decision
//! (eligibility, filtering, pagination, formatting, caching) lives in
//! `search::engine`.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job::{JobFeed, JobPage};
use crate::search::spec::{ExperienceBucket, FilterSpec, SalaryRange};
use crate::state::AppState;

/// Default page size of the remote listing (the site shows a wider grid
/// there).
const REMOTE_DEFAULT_LIMIT: u32 = 20;

/// Query parameters shared by the listing endpoints. Names follow the
/// original request contract (`keyWord`, `salaryRange`, ...).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JobsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "keyWord")]
    pub key_word: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    #[serde(rename = "salaryRange")]
    pub salary_range: Option<String>,
    pub experience: Option<String>,
    /// Feed label for the incremental loader: "all", "remote" or "featured".
    pub filter: Option<String>,
}

/// GET /api/v1/jobs
/// Plain active listing, newest first.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobPage>, AppError> {
    let spec = FilterSpec {
        label: "jobs".to_string(),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(state.config.default_page_size),
        ..Default::default()
    };

    let page = state.engine.search(&spec).await?;
    Ok(Json(page))
}

/// GET /api/v1/jobs/all
/// Full filter surface: keyword, location, type, salary range, experience.
pub async fn handle_all_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobPage>, AppError> {
    let spec = FilterSpec {
        label: "all".to_string(),
        keyword: non_empty(params.key_word),
        location: non_empty(params.location),
        job_type: non_empty(params.job_type),
        salary_range: params
            .salary_range
            .as_deref()
            .and_then(SalaryRange::parse),
        experience: params
            .experience
            .as_deref()
            .and_then(ExperienceBucket::from_label),
        featured_only: false,
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(state.config.default_page_size),
    };

    let page = state.engine.search(&spec).await?;
    Ok(Json(page))
}

/// GET /api/v1/jobs/remote
/// Listing restricted to remote/WFH postings.
pub async fn handle_remote_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobPage>, AppError> {
    let spec = FilterSpec {
        label: "remote".to_string(),
        location: Some("Remote".to_string()),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(REMOTE_DEFAULT_LIMIT),
        ..Default::default()
    };

    let page = state.engine.search(&spec).await?;
    Ok(Json(page))
}

/// GET /api/v1/jobs/load-more
/// Incremental-load feed: `{jobs, hasMore}` per page of a labeled feed.
pub async fn handle_load_more(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobFeed>, AppError> {
    let filter = params.filter.as_deref().unwrap_or("all");
    let mut spec = FilterSpec {
        label: format!("feed:{filter}"),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(state.config.default_page_size),
        ..Default::default()
    };
    match filter {
        "remote" => spec.location = Some("Remote".to_string()),
        "featured" => spec.featured_only = true,
        _ => {}
    }

    let feed = state.engine.load_more(&spec).await?;
    Ok(Json(feed))
}

/// Empty strings arrive when a filter field is submitted blank; treat them
/// as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
