use jcrtracker::core::insights::{Insights, employee_workload, project_timeline};
use jcrtracker::core::view::{
    ColumnFilter, apply_filters, parse_filters, quantity_summary, render_records, value_counts,
};
use jcrtracker::errors::AppError;
use jcrtracker::models::{JobCardRecord, Status};
use jcrtracker::workflow::candidates;

mod common;
use common::{day, fields, individual_form};

fn record(team: &str, name: &str, project: &str, qty: u8, d: u32, status: Status) -> JobCardRecord {
    let mut f = fields(project, qty);
    f.job_date = day(d);
    f.status = status;
    individual_form(team, name, project, qty)
        .target
        .expand(&f, "2024-07-11 16:30:00", "tester")
        .remove(0)
}

fn register() -> Vec<JobCardRecord> {
    vec![
        record("Paint", "B. Rossi", "X2", 10, 12, Status::Done),
        record("Paint", "C. Wong", "X2", 20, 12, Status::WorkInProgress),
        record("Paint", "B. Rossi", "X3", 5, 14, Status::ToBeStarted),
        record("Assembly", "A. Singh", "X1", 100, 13, Status::Done),
    ]
}

#[test]
fn filters_match_case_insensitive_substrings() {
    let records = register();

    let filters = parse_filters(&["employee_name=rossi".to_string()]).expect("parse");
    assert_eq!(apply_filters(&records, &filters).len(), 2);

    let filters =
        parse_filters(&["Employee_Team=paint".to_string(), "Project=x3".to_string()]).expect("parse");
    let hits = apply_filters(&records, &filters);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].project, "X3");

    // an empty needle keeps everything
    let filters = parse_filters(&["Remarks=".to_string()]).expect("parse");
    assert_eq!(apply_filters(&records, &filters).len(), 4);
}

#[test]
fn malformed_filters_are_rejected() {
    assert!(matches!(
        ColumnFilter::parse("Project"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        ColumnFilter::parse("Colour=red"),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn value_counts_sort_by_frequency() {
    let records = register();
    let counts = value_counts(&records, "project").expect("counts");
    assert_eq!(
        counts,
        vec![("X2".to_string(), 2), ("X3".to_string(), 1), ("X1".to_string(), 1)]
    );
    assert!(value_counts(&records, "Nope").is_err());
}

#[test]
fn quantity_summary_buckets_by_ten() {
    let records = register();
    let s = quantity_summary(&records).expect("summary");
    assert_eq!(s.count, 4);
    assert_eq!(s.total, 135);
    assert_eq!(s.min, 5);
    assert_eq!(s.max, 100);
    assert_eq!(s.buckets[0], 1);
    assert_eq!(s.buckets[1], 1);
    assert_eq!(s.buckets[2], 1);
    assert_eq!(s.buckets[9], 1);

    let empty: Vec<JobCardRecord> = Vec::new();
    assert!(quantity_summary(&empty).is_none());
}

#[test]
fn rendered_table_lists_every_row() {
    let records = register();
    let refs: Vec<&JobCardRecord> = records.iter().collect();
    let out = render_records(&refs, "-");
    assert!(out.contains("Employee_Name"));
    assert!(out.contains("A. Singh"));
    assert!(out.contains("DONE"));
}

#[test]
fn insights_aggregate_projects_workload_and_timeline() {
    let records = register();
    let insights = Insights::compute(&records).expect("insights");

    assert_eq!(insights.projects[0], ("X2".to_string(), 2));
    assert_eq!(insights.statuses[0], ("DONE".to_string(), 2));

    let workload = employee_workload(&records);
    assert_eq!(workload[0], ("A. Singh".to_string(), 100));
    assert!(workload.contains(&("B. Rossi".to_string(), 15)));

    let timeline = project_timeline(&records);
    assert_eq!(
        timeline,
        vec![
            (day(12), "X2".to_string(), 30),
            (day(13), "X1".to_string(), 100),
            (day(14), "X3".to_string(), 5),
        ]
    );

    let text = insights.render("-");
    assert!(text.contains("Project Distribution"));
    assert!(text.contains("Employee Workload"));
}

#[test]
fn candidates_narrow_progressively() {
    let records = register();

    assert_eq!(candidates::teams(&records), ["Paint", "Assembly"]);
    assert_eq!(candidates::dates_for_team(&records, "Paint"), [day(12), day(14)]);
    assert_eq!(
        candidates::members_for(&records, "Paint", &day(12)),
        ["B. Rossi", "C. Wong"]
    );
    assert!(candidates::members_for(&records, "Paint", &day(13)).is_empty());

    let entries = candidates::entries_for_employee(&records, "B. Rossi");
    assert_eq!(entries.len(), 2);
    assert!(entries[0].to_string().ends_with(" - 12/07/2024 - X2"));
}
