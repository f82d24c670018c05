//! Aggregates over the register: project and status distributions,
//! workload per employee and task quantities over time.

use crate::core::view::value_counts;
use crate::errors::AppResult;
use crate::models::JobCardRecord;
use crate::utils::date::format_job_date;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub projects: Vec<(String, usize)>,
    pub statuses: Vec<(String, usize)>,
    /// Sum of Task_Q per employee, largest first.
    pub workload: Vec<(String, u64)>,
    /// Sum of Task_Q per (date, project), chronological.
    pub timeline: Vec<(NaiveDate, String, u64)>,
}

pub fn employee_workload(records: &[JobCardRecord]) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    for r in records {
        let q = u64::from(r.task_quantity);
        match totals.iter_mut().find(|(name, _)| *name == r.employee_name) {
            Some((_, sum)) => *sum += q,
            None => totals.push((r.employee_name.clone(), q)),
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

pub fn project_timeline(records: &[JobCardRecord]) -> Vec<(NaiveDate, String, u64)> {
    let mut grouped: BTreeMap<(NaiveDate, String), u64> = BTreeMap::new();
    for r in records {
        *grouped
            .entry((r.job_date, r.project.clone()))
            .or_default() += u64::from(r.task_quantity);
    }
    grouped
        .into_iter()
        .map(|((date, project), q)| (date, project, q))
        .collect()
}

impl Insights {
    pub fn compute(records: &[JobCardRecord]) -> AppResult<Self> {
        Ok(Self {
            projects: value_counts(records, "Project")?,
            statuses: value_counts(records, "Status")?,
            workload: employee_workload(records),
            timeline: project_timeline(records),
        })
    }

    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();

        out.push_str("Project Distribution\n");
        let mut t = Table::new(vec![Column::new("Project", 30), Column::new("Entries", 8)]);
        for (p, n) in &self.projects {
            t.add_row(vec![p.clone(), n.to_string()]);
        }
        out.push_str(&t.render(separator));

        out.push_str("\nTask Status\n");
        let mut t = Table::new(vec![Column::new("Status", 8), Column::new("Entries", 8)]);
        for (s, n) in &self.statuses {
            t.add_row(vec![s.clone(), n.to_string()]);
        }
        out.push_str(&t.render(separator));

        out.push_str("\nEmployee Workload\n");
        let mut t = Table::new(vec![Column::new("Employee", 30), Column::new("Task_Q", 8)]);
        for (e, q) in &self.workload {
            t.add_row(vec![e.clone(), q.to_string()]);
        }
        out.push_str(&t.render(separator));

        out.push_str("\nProject Timeline\n");
        let mut t = Table::new(vec![
            Column::new("Date", 10),
            Column::new("Project", 30),
            Column::new("Task_Q", 8),
        ]);
        for (d, p, q) in &self.timeline {
            t.add_row(vec![format_job_date(d), p.clone(), q.to_string()]);
        }
        out.push_str(&t.render(separator));

        out
    }
}
