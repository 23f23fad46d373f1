//! PostgreSQL implementation of the job store.
//!
//! The pre-filter is assembled dynamically with `QueryBuilder`; every
//! user-supplied value goes through `push_bind`, never into the SQL text.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::storage::{JobQuery, JobStore, LocationFilter};

const SELECT_COLUMNS: &str = "SELECT j.id, j.business_id, j.title, j.company_name, \
     j.description, j.technique, j.city, j.location, j.job_type, j.salary, \
     j.experience, j.is_recommended, j.logo_path, j.expiry_time, j.created_at, \
     b.company_name AS business_company_name, b.logo AS business_logo \
     FROM jobs j LEFT JOIN businesses b ON b.id = j.business_id";

const COUNT_FROM: &str = "SELECT COUNT(*) FROM jobs j";

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn count_jobs(&self, query: &JobQuery) -> Result<u64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(COUNT_FROM);
        push_filters(&mut qb, query);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn find_jobs(
        &self,
        query: &JobQuery,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<JobRow>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_COLUMNS);
        push_filters(&mut qb, query);

        qb.push(" ORDER BY j.created_at DESC, j.id DESC LIMIT ");
        qb.push_bind(i64::from(limit));
        qb.push(" OFFSET ");
        qb.push_bind(skip as i64);

        let rows = qb.build_query_as::<JobRow>().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

/// Appends the WHERE clause for a pre-filter.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &JobQuery) {
    qb.push(" WHERE j.expiry_time >= ");
    qb.push_bind(query.active_at);

    if let Some(keyword) = &query.keyword {
        let pattern = like_pattern(keyword);
        qb.push(" AND (j.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR j.company_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR j.description ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR j.technique ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    match &query.location {
        Some(LocationFilter::Remote) => {
            qb.push(
                " AND (j.job_type ILIKE '%remote%' OR j.city ILIKE '%remote%' \
                 OR j.location ILIKE '%remote%' OR j.location ILIKE '%wfh%' \
                 OR j.location ILIKE '%work from home%')",
            );
        }
        Some(LocationFilter::Place(place)) => {
            let pattern = like_pattern(place);
            qb.push(" AND (j.city ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR j.location ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
        None => {}
    }

    if let Some(job_type) = &query.job_type {
        qb.push(" AND j.job_type ILIKE ");
        qb.push_bind(like_pattern(job_type));
    }

    if query.featured_only {
        qb.push(" AND j.is_recommended = TRUE");
    }
}

/// Wraps a user value for ILIKE, escaping the pattern metacharacters.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }
}
