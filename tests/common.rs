#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use jcrtracker::db::pool::DbPool;
use jcrtracker::db::store::SqliteStore;
use jcrtracker::models::{Presence, Status};
use jcrtracker::workflow::{CreateForm, CreateTarget, SharedFields};
use std::env;
use std::fs;
use std::path::PathBuf;

/// `jcr` binary with HOME pointed at a private directory, so no real
/// configuration file is read or written.
pub fn jcr() -> Command {
    let mut home: PathBuf = env::temp_dir();
    home.push("jcrtracker_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("jcr");
    cmd.env("HOME", &home).env("USERPROFILE", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_jcrtracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode, so the schema exists before the first command.
pub fn init_db(db_path: &str) {
    jcr()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn memory_store() -> SqliteStore {
    SqliteStore::from_pool(DbPool::in_memory().expect("in-memory db")).expect("init store")
}

pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 11)
        .and_then(|d| d.and_hms_opt(16, 30, 0))
        .expect("valid timestamp")
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).expect("valid date")
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn fields(project: &str, qty: u8) -> SharedFields {
    SharedFields {
        job_date: day(12),
        presence: Presence::Present,
        project: project.to_string(),
        phase_space: "P1".to_string(),
        product: "Frame".to_string(),
        part_number: "FR-100".to_string(),
        part_name: "Bracket".to_string(),
        task: "Welding".to_string(),
        task_quantity: qty,
        start_time: hm(9, 0),
        finish_time: hm(18, 0),
        status: Status::ToBeStarted,
        remarks: String::new(),
    }
}

pub fn team_form(team: &str, members: &[&str], project: &str) -> CreateForm {
    CreateForm {
        target: CreateTarget::Team {
            team: team.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        },
        fields: fields(project, 10),
    }
}

pub fn individual_form(team: &str, employee: &str, project: &str, qty: u8) -> CreateForm {
    CreateForm {
        target: CreateTarget::Individual {
            team: team.to_string(),
            employee: employee.to_string(),
        },
        fields: fields(project, qty),
    }
}
