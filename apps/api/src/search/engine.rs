//! Search/pagination engine: one `FilterSpec` in, one formatted page out.
//!
//! Per call: probe the cache, build the pre-filter, fetch count and
//! candidates concurrently, narrow salary/experience in memory, cut the page
//! after narrowing, format, cache. Each call is stateless; the cache is the
//! only state shared across calls.
//!
//! Two accuracy limitations are deliberate and documented rather than fixed:
//! totals come from the pre-filter count (optimistic under post-filtering),
//! and the over-fetch is a heuristic, so a post-filtered page can under-fill
//! even when more matches exist deeper in the collection.

use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;
use crate::errors::AppError;
use crate::models::job::{JobFeed, JobPage, PageMeta};
use crate::search::cache::SearchCache;
use crate::search::format;
use crate::search::predicates;
use crate::search::spec::FilterSpec;
use crate::storage::JobStore;

#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn JobStore>,
    cache: SearchCache,
    clock: Arc<dyn Clock>,
    /// Fetch-size multiplier applied when post-filtering is active.
    overfetch_factor: u32,
}

impl SearchEngine {
    pub fn new(
        store: Arc<dyn JobStore>,
        cache: SearchCache,
        clock: Arc<dyn Clock>,
        overfetch_factor: u32,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
            overfetch_factor: overfetch_factor.max(1),
        }
    }

    /// Runs one search and returns the formatted page.
    ///
    /// Storage failure aborts the whole request — the caller receives an
    /// error, never a silently empty page.
    pub async fn search(&self, spec: &FilterSpec) -> Result<JobPage, AppError> {
        let spec = spec.clone().sanitized();
        let now = self.clock.now();
        let query = spec.to_query(now);
        let key = SearchCache::derive_key(&query, spec.page, spec.limit, &spec.cache_label());

        if let Some(page) = self.cache.get(&key) {
            debug!(label = %spec.label, page = spec.page, "search cache hit");
            return Ok(page);
        }

        // Salary/experience intervals live in free-text columns, so the
        // store can only pre-filter; over-fetch to keep the page filled
        // after the in-memory pass.
        let needs_post_filter = spec.needs_post_filter();
        let fetch_limit = if needs_post_filter {
            spec.limit.saturating_mul(self.overfetch_factor)
        } else {
            spec.limit
        };
        let skip = u64::from(spec.page - 1) * u64::from(spec.limit);

        // Independent reads; dispatch together.
        let (total_jobs, rows) = tokio::try_join!(
            self.store.count_jobs(&query),
            self.store.find_jobs(&query, skip, fetch_limit)
        )?;

        let fetched = rows.len();
        let mut candidates = rows;
        if let Some(range) = &spec.salary_range {
            candidates.retain(|job| predicates::matches_salary_range(&job.salary, range));
        }
        if let Some(bucket) = &spec.experience {
            candidates.retain(|job| {
                predicates::matches_experience_bucket(
                    job.experience.as_deref().unwrap_or(""),
                    bucket,
                )
            });
        }
        // The page boundary applies after narrowing, never before.
        candidates.truncate(spec.limit as usize);

        if needs_post_filter {
            debug!(
                fetched,
                surviving = candidates.len(),
                "post-filter narrowed the fetched candidates"
            );
        }

        let jobs = candidates
            .iter()
            .map(|job| format::summarize(job, now))
            .collect();

        // Denominator is the pre-filter count: totals are approximate while
        // salary/experience filters are active.
        let total_pages = (total_jobs.div_ceil(u64::from(spec.limit))) as u32;
        let page = JobPage {
            jobs,
            pagination: PageMeta {
                current_page: spec.page,
                total_pages,
                total_jobs,
                has_next: spec.page < total_pages,
                has_prev: spec.page > 1,
            },
        };

        self.cache.set(key, page.clone());
        Ok(page)
    }

    /// Incremental-load variant: same computation, `{jobs, hasMore}` shape.
    pub async fn load_more(&self, spec: &FilterSpec) -> Result<JobFeed, AppError> {
        let page = self.search(spec).await?;
        Ok(JobFeed {
            has_more: page.pagination.has_next,
            jobs: page.jobs,
        })
    }
}
