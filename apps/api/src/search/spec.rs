//! Request-side filter model: one `FilterSpec` per search call.
//!
//! A spec is lowered to a `JobQuery` (the storage-expressible pre-filter);
//! salary and experience stay on the spec because they can only be applied in
//! memory after the fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{JobQuery, LocationFilter};

/// Sentinel upper bound meaning "and above" in a requested salary range.
pub const SALARY_OPEN_END: u32 = 9999;

/// Hard ceiling on the requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A requested salary interval, parsed from the wire form `"min-max"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

impl SalaryRange {
    /// Parses `"min-max"`. Malformed bounds degrade instead of failing:
    /// an unreadable min becomes 0, an unreadable or missing max becomes the
    /// open-end sentinel. Only an entirely empty string yields no range.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let normalized = raw.replace(['–', '—'], "-");
        let mut parts = normalized.splitn(2, '-');
        let min = parts
            .next()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(0);
        let max = parts
            .next()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(SALARY_OPEN_END);
        Some(Self { min, max })
    }

    pub fn is_open_ended(&self) -> bool {
        self.max == SALARY_OPEN_END
    }
}

/// Coarse experience intervals offered by the filter UI, in months.
/// Adjacent buckets deliberately overlap at their shared boundary, matching
/// how the listing site groups them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceBucket {
    /// Exactly zero required months.
    NoRequirement,
    /// At most 12 months.
    UnderOneYear,
    /// 12 to 24 months.
    OneToTwoYears,
    /// 24 to 48 months.
    TwoToFourYears,
    /// 36 to 60 months.
    ThreeToFiveYears,
    /// 60 to 120 months.
    FiveToTenYears,
    /// More than 120 months.
    OverTenYears,
    /// Unrecognized label; matched as a raw substring of the record text.
    Other(String),
}

impl ExperienceBucket {
    /// Maps a request label to its bucket. Labels are matched loosely
    /// (case-insensitive, dash-variant tolerant, surrounding text allowed)
    /// because they arrive as display strings, not enum codes.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        let folded = trimmed.to_lowercase().replace(['–', '—'], "-");
        let bucket = if folded.contains("không yêu cầu") {
            Self::NoRequirement
        } else if folded.contains("dưới 1 năm") {
            Self::UnderOneYear
        } else if folded.contains("1-2 năm") {
            Self::OneToTwoYears
        } else if folded.contains("2-4 năm") {
            Self::TwoToFourYears
        } else if folded.contains("3-5 năm") {
            Self::ThreeToFiveYears
        } else if folded.contains("5-10 năm") {
            Self::FiveToTenYears
        } else if folded.contains("trên 10 năm") {
            Self::OverTenYears
        } else {
            Self::Other(trimmed.to_string())
        };
        Some(bucket)
    }

    /// Display label, as it appears in the cache-key segment.
    pub fn label(&self) -> &str {
        match self {
            Self::NoRequirement => "Không yêu cầu",
            Self::UnderOneYear => "Dưới 1 năm",
            Self::OneToTwoYears => "1-2 năm",
            Self::TwoToFourYears => "2-4 năm",
            Self::ThreeToFiveYears => "3-5 năm",
            Self::FiveToTenYears => "5-10 năm",
            Self::OverTenYears => "Trên 10 năm",
            Self::Other(label) => label,
        }
    }
}

/// The full set of user-supplied search parameters for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Cache-key label distinguishing the calling surface/feed.
    pub label: String,
    pub keyword: Option<String>,
    /// City/district text; the literal "Remote" selects the remote pattern.
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub salary_range: Option<SalaryRange>,
    pub experience: Option<ExperienceBucket>,
    pub featured_only: bool,
    pub page: u32,
    pub limit: u32,
}

impl FilterSpec {
    /// Clamps pagination to usable values: page >= 1, 1 <= limit <= MAX.
    pub fn sanitized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// True when the result set must be narrowed in memory after the fetch —
    /// salary/experience intervals cannot be expressed over free-text columns.
    pub fn needs_post_filter(&self) -> bool {
        self.salary_range.is_some() || self.experience.is_some()
    }

    /// Lowers this spec to the storage-expressible pre-filter, anchored at
    /// the given eligibility instant. Salary/experience conditions do not
    /// lower: a substring narrowing over the free-text columns would drop
    /// records the exact bucket predicates accept, and a pre-filter must
    /// stay a superset of the final filter.
    pub fn to_query(&self, active_at: DateTime<Utc>) -> JobQuery {
        let location = self.location.as_deref().map(|loc| {
            if loc.eq_ignore_ascii_case("remote") {
                LocationFilter::Remote
            } else {
                LocationFilter::Place(loc.to_string())
            }
        });
        JobQuery {
            active_at,
            keyword: self.keyword.clone(),
            location,
            job_type: self.job_type.clone(),
            featured_only: self.featured_only,
        }
    }

    /// Cache-key label: the surface label plus the in-memory filter
    /// conditions, which the lowered pre-filter cannot carry. Without them
    /// two searches differing only in salary/experience would share a cache
    /// entry.
    pub fn cache_label(&self) -> String {
        let mut label = self.label.clone();
        if let Some(range) = &self.salary_range {
            label.push_str(&format!("|salary={}-{}", range.min, range.max));
        }
        if let Some(bucket) = &self.experience {
            label.push_str(&format!("|exp={}", bucket.label()));
        }
        label
    }
}
