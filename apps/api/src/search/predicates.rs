//! Filter predicates over free-text salary and experience fields.
//!
//! Listings store salary ("$1,000 - $2,000") and experience ("2-4 năm",
//! "Không yêu cầu") as display strings, so range filters cannot be pushed
//! into the storage query. These functions turn the strings into comparable
//! numbers. All of them are total: malformed or empty text degrades to
//! 0/false, never to an error, so one bad record cannot abort a whole page.

use lazy_static::lazy_static;
use regex::Regex;

use crate::search::spec::{ExperienceBucket, SalaryRange};

lazy_static! {
    /// Currency-prefixed number, thousands separators allowed: "$1,200".
    static ref SALARY_TOKEN: Regex = Regex::new(r"\$([0-9][0-9,]*)").unwrap();
    /// "N năm" (years).
    static ref YEARS: Regex = Regex::new(r"(?i)(\d+)\s*năm").unwrap();
    /// "N tháng" (months).
    static ref MONTHS: Regex = Regex::new(r"(?i)(\d+)\s*tháng").unwrap();
    /// "A-B năm" range, hyphen/en-dash/em-dash tolerant.
    static ref YEAR_RANGE: Regex = Regex::new(r"(?i)(\d+)\s*[-–—]\s*(\d+)\s*năm").unwrap();
    /// Phrases meaning "no experience required" (Vietnamese/English mixed data).
    static ref NO_REQUIREMENT: Regex =
        Regex::new(r"(?i)không yêu cầu|no required|not required").unwrap();
    /// Remote/work-from-home markers.
    static ref REMOTE: Regex = Regex::new(r"(?i)remote|wfh|work from home").unwrap();
}

/// Minimum dollar amount mentioned in a salary string, 0 if none.
///
/// "$1,000 - $2,500" yields 1000: the floor of a range is the worst case the
/// listing promises, which is what a minimum-salary filter must compare
/// against. Deliberately the minimum of all tokens, not the first.
pub fn parse_salary_floor(salary: &str) -> u32 {
    SALARY_TOKEN
        .captures_iter(salary)
        .filter_map(|cap| cap[1].replace(',', "").parse::<u32>().ok())
        .min()
        .unwrap_or(0)
}

/// Total months of required experience expressed by a free-text string.
///
/// "1 năm 6 tháng" → 18. A range "2-4 năm" is collapsed to its lower bound
/// (24): a candidate clearing the lower bound can apply, so the lower bound
/// governs bucket membership. "Không yêu cầu" and unparseable text → 0.
pub fn parse_experience_months(experience: &str) -> u32 {
    if experience.is_empty() || NO_REQUIREMENT.is_match(experience) {
        return 0;
    }

    let mut total = 0u32;
    if let Some(cap) = YEARS.captures(experience) {
        total += cap[1].parse::<u32>().unwrap_or(0) * 12;
    }
    if let Some(cap) = MONTHS.captures(experience) {
        total += cap[1].parse::<u32>().unwrap_or(0);
    }

    // An explicit range overrides the additive parse with its lower bound.
    if let Some(cap) = YEAR_RANGE.captures(experience) {
        total = cap[1].parse::<u32>().unwrap_or(0) * 12;
    }

    total
}

/// Whether a salary string clears the requested range.
/// An open-ended range (`max` = sentinel) means "floor >= min and above".
pub fn matches_salary_range(salary: &str, range: &SalaryRange) -> bool {
    let floor = parse_salary_floor(salary);
    if range.is_open_ended() {
        floor >= range.min
    } else {
        floor >= range.min && floor <= range.max
    }
}

/// Whether an experience string falls into the requested bucket.
///
/// Buckets are fixed month intervals; an unrecognized label falls back to a
/// case-insensitive substring match against the raw text.
pub fn matches_experience_bucket(experience: &str, bucket: &ExperienceBucket) -> bool {
    let months = parse_experience_months(experience);
    match bucket {
        ExperienceBucket::NoRequirement => months == 0,
        ExperienceBucket::UnderOneYear => months <= 12,
        ExperienceBucket::OneToTwoYears => (12..=24).contains(&months),
        ExperienceBucket::TwoToFourYears => (24..=48).contains(&months),
        ExperienceBucket::ThreeToFiveYears => (36..=60).contains(&months),
        ExperienceBucket::FiveToTenYears => (60..=120).contains(&months),
        ExperienceBucket::OverTenYears => months > 120,
        ExperienceBucket::Other(label) => {
            !experience.is_empty()
                && experience.to_lowercase().contains(&label.to_lowercase())
        }
    }
}

/// Whether a listing reads as remote, checking the three fields the data
/// actually scatters the marker across.
pub fn is_remote_text(job_type: &str, city: &str, location: &str) -> bool {
    REMOTE.is_match(job_type) || REMOTE.is_match(city) || REMOTE.is_match(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_floor_without_tokens_is_zero() {
        assert_eq!(parse_salary_floor("Thỏa thuận"), 0);
        assert_eq!(parse_salary_floor(""), 0);
        assert_eq!(parse_salary_floor("competitive"), 0);
    }

    #[test]
    fn salary_floor_takes_minimum_not_first() {
        assert_eq!(parse_salary_floor("$2,500 - $1,000"), 1000);
        assert_eq!(parse_salary_floor("$1,000 and $2,500"), 1000);
    }

    #[test]
    fn salary_floor_strips_separators() {
        assert_eq!(parse_salary_floor("up to $12,345"), 12345);
    }

    #[test]
    fn experience_no_requirement_is_zero() {
        assert_eq!(parse_experience_months("Không yêu cầu"), 0);
        assert_eq!(parse_experience_months("KHÔNG YÊU CẦU"), 0);
        assert_eq!(parse_experience_months("no required"), 0);
        assert_eq!(parse_experience_months(""), 0);
    }

    #[test]
    fn experience_years_and_months_add_up() {
        assert_eq!(parse_experience_months("2 năm"), 24);
        assert_eq!(parse_experience_months("6 tháng"), 6);
        assert_eq!(parse_experience_months("1 năm 6 tháng"), 18);
    }

    #[test]
    fn experience_range_collapses_to_lower_bound() {
        assert_eq!(parse_experience_months("2-4 năm"), 24);
        assert_eq!(parse_experience_months("2 – 4 năm"), 24);
        assert_eq!(parse_experience_months("3—5 năm"), 36);
    }

    #[test]
    fn experience_without_numbers_is_zero() {
        assert_eq!(parse_experience_months("nhiều năm kinh nghiệm năm"), 0);
        assert_eq!(parse_experience_months("some experience"), 0);
    }

    #[test]
    fn salary_range_closed_interval() {
        let range = SalaryRange { min: 1000, max: 2000 };
        assert!(matches_salary_range("$1,500", &range));
        assert!(matches_salary_range("$1,000", &range));
        assert!(!matches_salary_range("$2,001", &range));
        assert!(!matches_salary_range("$999", &range));
    }

    #[test]
    fn salary_range_open_ended_above_min() {
        let range = SalaryRange::parse("2000-9999").unwrap();
        assert!(range.is_open_ended());
        assert!(matches_salary_range("$2,000", &range));
        assert!(matches_salary_range("$50,000", &range));
        assert!(!matches_salary_range("$1,999", &range));
    }

    #[test]
    fn bucket_no_requirement_matches_no_requirement_text() {
        assert!(matches_experience_bucket(
            "Không yêu cầu",
            &ExperienceBucket::NoRequirement
        ));
        assert!(!matches_experience_bucket(
            "2 năm",
            &ExperienceBucket::NoRequirement
        ));
    }

    #[test]
    fn bucket_two_to_four_years() {
        assert!(matches_experience_bucket(
            "2-4 năm",
            &ExperienceBucket::TwoToFourYears
        ));
        assert!(matches_experience_bucket(
            "3 năm",
            &ExperienceBucket::TwoToFourYears
        ));
        assert!(!matches_experience_bucket(
            "5 năm",
            &ExperienceBucket::TwoToFourYears
        ));
    }

    #[test]
    fn bucket_boundaries_are_inclusive() {
        // 1 năm = 12 months sits in both "under 1 year" and "1-2 years".
        assert!(matches_experience_bucket(
            "1 năm",
            &ExperienceBucket::UnderOneYear
        ));
        assert!(matches_experience_bucket(
            "1 năm",
            &ExperienceBucket::OneToTwoYears
        ));
        assert!(matches_experience_bucket(
            "10 năm",
            &ExperienceBucket::FiveToTenYears
        ));
        assert!(!matches_experience_bucket(
            "10 năm",
            &ExperienceBucket::OverTenYears
        ));
        assert!(matches_experience_bucket(
            "11 năm",
            &ExperienceBucket::OverTenYears
        ));
    }

    #[test]
    fn bucket_unknown_label_falls_back_to_substring() {
        let bucket = ExperienceBucket::Other("thực tập".to_string());
        assert!(matches_experience_bucket("Thực tập sinh", &bucket));
        assert!(!matches_experience_bucket("2 năm", &bucket));
        assert!(!matches_experience_bucket("", &bucket));
    }

    #[test]
    fn remote_detection_spans_all_three_fields() {
        assert!(is_remote_text("Remote", "Hà Nội", "văn phòng"));
        assert!(is_remote_text("Full-time", "remote", "văn phòng"));
        assert!(is_remote_text("Full-time", "Hà Nội", "WFH"));
        assert!(is_remote_text("Full-time", "Hà Nội", "work from home"));
        assert!(!is_remote_text("Full-time", "Hà Nội", "Cầu Giấy"));
    }
}
