use jcrtracker::errors::AppError;
use jcrtracker::export::{ExportFormat, export_records};
use jcrtracker::models::JobCardRecord;
use std::fs;

mod common;
use common::{fields, team_form, temp_out};

fn records() -> Vec<JobCardRecord> {
    team_form("Paint", &["B. Rossi", "C. Wong"], "X2")
        .target
        .expand(&fields("X2", 7), "2024-07-11 16:30:00", "tester")
}

#[test]
fn csv_export_uses_column_names_as_header() {
    let out = temp_out("export_csv_header", "csv");
    let records = records();
    let refs: Vec<&JobCardRecord> = records.iter().collect();

    let n = export_records(&refs, ExportFormat::Csv, &out, false).expect("export");
    assert_eq!(n, 2);

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    let header = lines.next().expect("header");
    assert!(header.starts_with("Job_UID,Job_Created_At,Job_Created_By,Job_Date,Employee_Team"));
    assert!(header.ends_with("Status,Remarks"));
    assert_eq!(lines.count(), 2);
    assert!(content.contains("B. Rossi"));
    assert!(content.contains("12/07/2024"));
}

#[test]
fn empty_csv_export_still_has_a_header() {
    let out = temp_out("export_csv_empty", "csv");
    let n = export_records(&[], ExportFormat::Csv, &out, false).expect("export");
    assert_eq!(n, 0);

    let content = fs::read_to_string(&out).expect("read csv");
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("Job_UID,"));
}

#[test]
fn json_export_is_an_array_of_rows() {
    let out = temp_out("export_json_rows", "json");
    let records = records();
    let refs: Vec<&JobCardRecord> = records.iter().collect();
    export_records(&refs, ExportFormat::Json, &out, false).expect("export");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read json")).expect("valid json");
    let rows = value.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Employee_Team"], "Paint");
    assert_eq!(rows[0]["Task_Q"], 7);
    assert_eq!(rows[0]["Status"], "TBS");
}

#[test]
fn existing_file_needs_force() {
    let out = temp_out("export_force", "csv");
    fs::write(&out, "keep me").expect("seed file");

    let err = export_records(&[], ExportFormat::Csv, &out, false).unwrap_err();
    assert!(matches!(err, AppError::Export(_)));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    export_records(&[], ExportFormat::Csv, &out, true).expect("forced export");
    assert!(fs::read_to_string(&out).expect("read").starts_with("Job_UID"));
}
