//! Display formatting for job summaries: relative posting age, absolute
//! dates, and the company-name/logo fallback chain.

use chrono::{DateTime, Datelike, Utc};

use crate::models::job::{JobRow, JobSummary};
use crate::search::predicates;

/// Company name shown when neither the listing nor the business carries one.
const COMPANY_FALLBACK: &str = "Công ty";

/// Description preview length, in characters.
const DESCRIPTION_PREVIEW_CHARS: usize = 160;

/// Age of a posting as the site displays it: "vừa xong" under an hour,
/// hours under a day, days under a week, then the absolute date.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;
    let hours = diff.num_hours();
    if hours < 1 {
        return "vừa xong".to_string();
    }
    if hours < 24 {
        return format!("{hours} giờ trước");
    }
    let days = diff.num_days();
    if days < 7 {
        return format!("{days} ngày trước");
    }
    short_date(then)
}

/// dd/mm/yyyy.
pub fn short_date(date: DateTime<Utc>) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// Truncates on a character boundary, appending an ellipsis when shortened.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

/// Formats one row into its display projection.
///
/// Company name resolves listing copy → owning business → generic fallback;
/// the logo resolves listing upload → business logo. Empty strings count as
/// absent, matching how the upstream data actually degrades.
pub fn summarize(row: &JobRow, now: DateTime<Utc>) -> JobSummary {
    let company_name = [row.company_name.as_deref(), row.business_company_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .unwrap_or(COMPANY_FALLBACK)
        .to_string();

    let company_logo = [row.logo_path.as_deref(), row.business_logo.as_deref()]
        .into_iter()
        .flatten()
        .find(|logo| !logo.trim().is_empty())
        .map(str::to_string);

    JobSummary {
        id: row.id,
        title: row.title.clone(),
        company_name,
        company_logo,
        city: row.city.clone(),
        location: row.location.clone(),
        job_type: row.job_type.clone(),
        salary: row.salary.clone(),
        description: truncate_description(
            row.description.as_deref().unwrap_or(""),
            DESCRIPTION_PREVIEW_CHARS,
        ),
        posted: relative_time(row.created_at, now),
        expires_on: short_date(row.expiry_time),
        is_remote: predicates::is_remote_text(&row.job_type, &row.city, &row.location),
        is_featured: row.is_recommended,
    }
}
