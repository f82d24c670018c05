//! Choices offered by the selection steps, derived by narrowing the full
//! register: team → dates of that team → members of that team and date.
//! Distinct values keep the order in which they first appear.

use crate::models::JobCardRecord;
use crate::utils::date::format_job_date;
use chrono::NaiveDate;
use std::fmt;

fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

pub fn teams(records: &[JobCardRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.team.as_str()))
}

pub fn employees(records: &[JobCardRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.employee_name.as_str()))
}

pub fn projects(records: &[JobCardRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.project.as_str()))
}

/// Dates with at least one entry for `team`, oldest first.
pub fn dates_for_team(records: &[JobCardRecord], team: &str) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = records
        .iter()
        .filter(|r| r.team == team)
        .map(|r| r.job_date)
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

pub fn members_for(records: &[JobCardRecord], team: &str, date: &NaiveDate) -> Vec<String> {
    distinct(
        records
            .iter()
            .filter(|r| r.team == team && r.job_date == *date)
            .map(|r| r.employee_name.as_str()),
    )
}

/// One selectable entry of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOption {
    pub uid: String,
    pub job_date: NaiveDate,
    pub project: String,
}

impl fmt::Display for EntryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.uid,
            format_job_date(&self.job_date),
            self.project
        )
    }
}

pub fn entries_for_employee(records: &[JobCardRecord], employee: &str) -> Vec<EntryOption> {
    records
        .iter()
        .filter(|r| r.employee_name == employee)
        .map(|r| EntryOption {
            uid: r.uid.clone(),
            job_date: r.job_date,
            project: r.project.clone(),
        })
        .collect()
}
