use crate::models::job_card::JOB_DATE_FORMAT;
use chrono::{Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Default job date offered by the create form: tomorrow.
pub fn tomorrow() -> NaiveDate {
    today().checked_add_days(Days::new(1)).unwrap_or_else(today)
}

/// Parse a job date as typed by a user.
/// Accepts the storage format (DD/MM/YYYY) and ISO (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, JOB_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Parse a `Job_Date` column value (DD/MM/YYYY only).
pub fn parse_job_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), JOB_DATE_FORMAT).ok()
}

pub fn format_job_date(d: &NaiveDate) -> String {
    d.format(JOB_DATE_FORMAT).to_string()
}
