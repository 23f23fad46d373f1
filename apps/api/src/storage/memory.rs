//! In-memory `JobStore` for engine tests: interprets `JobQuery` with the
//! same semantics as the Postgres implementation, plus switches for failure
//! injection and call counting.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::search::predicates;
use crate::storage::{JobQuery, JobStore, LocationFilter};

#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: Vec<JobRow>,
    fail: AtomicBool,
    pub count_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
}

impl InMemoryJobStore {
    pub fn new(jobs: Vec<JobRow>) -> Self {
        Self {
            jobs,
            ..Default::default()
        }
    }

    /// Makes every subsequent call fail like a dropped connection.
    pub fn fail_next_calls(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    fn matching(&self, query: &JobQuery) -> Vec<JobRow> {
        let mut rows: Vec<JobRow> = self
            .jobs
            .iter()
            .filter(|job| matches_query(job, query))
            .cloned()
            .collect();
        // Newest first, id as the deterministic tie-break — same ordering
        // contract as the Postgres store.
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn count_jobs(&self, query: &JobQuery) -> Result<u64, AppError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.matching(query).len() as u64)
    }

    async fn find_jobs(
        &self,
        query: &JobQuery,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<JobRow>, AppError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self
            .matching(query)
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }
}

fn matches_query(job: &JobRow, query: &JobQuery) -> bool {
    if job.expiry_time < query.active_at {
        return false;
    }

    if let Some(keyword) = &query.keyword {
        let hit = contains_ci(&job.title, keyword)
            || contains_ci(job.company_name.as_deref().unwrap_or(""), keyword)
            || contains_ci(job.description.as_deref().unwrap_or(""), keyword)
            || contains_ci(&job.technique, keyword);
        if !hit {
            return false;
        }
    }

    match &query.location {
        Some(LocationFilter::Remote) => {
            if !predicates::is_remote_text(&job.job_type, &job.city, &job.location) {
                return false;
            }
        }
        Some(LocationFilter::Place(place)) => {
            if !contains_ci(&job.city, place) && !contains_ci(&job.location, place) {
                return false;
            }
        }
        None => {}
    }

    if let Some(job_type) = &query.job_type {
        if !contains_ci(&job.job_type, job_type) {
            return false;
        }
    }

    if query.featured_only && !job.is_recommended {
        return false;
    }

    true
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn query_at(now: chrono::DateTime<Utc>) -> JobQuery {
        JobQuery {
            active_at: now,
            keyword: None,
            location: None,
            job_type: None,
            featured_only: false,
        }
    }

    fn base_job(title: &str) -> JobRow {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        JobRow {
            id: Uuid::new_v4(),
            business_id: Uuid::new_v4(),
            title: title.to_string(),
            company_name: Some("Công ty A".to_string()),
            description: Some("mô tả".to_string()),
            technique: "Rust".to_string(),
            city: "Hà Nội".to_string(),
            location: "Cầu Giấy".to_string(),
            job_type: "Full-time".to_string(),
            salary: "$1,000".to_string(),
            experience: Some("2 năm".to_string()),
            is_recommended: false,
            logo_path: None,
            expiry_time: created + Duration::days(30),
            created_at: created,
            business_company_name: None,
            business_logo: None,
        }
    }

    #[tokio::test]
    async fn ordering_is_newest_first_with_id_tie_break() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let mut older = base_job("older");
        older.created_at = now - Duration::hours(5);
        let mut newer = base_job("newer");
        newer.created_at = now - Duration::hours(1);

        let mut tied_a = base_job("tied-a");
        let mut tied_b = base_job("tied-b");
        tied_a.created_at = now - Duration::hours(3);
        tied_b.created_at = now - Duration::hours(3);

        let store = InMemoryJobStore::new(vec![
            older.clone(),
            tied_a.clone(),
            newer.clone(),
            tied_b.clone(),
        ]);
        let query = query_at(now);
        let rows = store.find_jobs(&query, 0, 10).await.unwrap();

        assert_eq!(rows[0].title, "newer");
        assert_eq!(rows[3].title, "older");
        // The tied pair resolves by id descending, whatever the input order.
        let tied_first = std::cmp::max(tied_a.id, tied_b.id);
        assert_eq!(rows[1].id, tied_first);
    }

    #[tokio::test]
    async fn keyword_and_type_filters_compose() {
        let mut rustacean = base_job("rustacean");
        rustacean.technique = "Rust, Tokio".to_string();
        rustacean.job_type = "Part-time".to_string();
        let mut other = base_job("other");
        other.technique = "PHP".to_string();

        let store = InMemoryJobStore::new(vec![rustacean, other]);
        let mut query = query_at(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
        query.keyword = Some("tokio".to_string());
        query.job_type = Some("part".to_string());

        let rows = store.find_jobs(&query, 0, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "rustacean");
    }

    #[tokio::test]
    async fn failure_injection_surfaces_database_error() {
        let store = InMemoryJobStore::new(vec![base_job("any")]);
        store.fail_next_calls();
        let query = query_at(Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap());
        assert!(matches!(
            store.count_jobs(&query).await,
            Err(AppError::Database(_))
        ));
    }
}
