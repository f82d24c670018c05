use jcrtracker::config::{Config, EmptyTeamPolicy, MAX_SESSION_TTL_MINUTES, UpdateResolution};
use jcrtracker::errors::AppError;
use jcrtracker::workflow::WorkflowPolicy;
use std::fs;
use std::path::Path;

mod common;
use common::temp_out;

#[test]
fn missing_keys_fall_back_to_defaults() {
    let path = temp_out("config_defaults", "conf");
    fs::write(&path, "database: /tmp/jcr_defaults.sqlite\n").expect("write config");

    let cfg = Config::load_from(Path::new(&path)).expect("load");
    assert_eq!(cfg.database, "/tmp/jcr_defaults.sqlite");
    assert_eq!(cfg.created_by, "jcr_agent");
    assert_eq!(cfg.empty_team_policy, EmptyTeamPolicy::Allow);
    assert_eq!(cfg.team_update_resolution, UpdateResolution::Snapshot);
    assert_eq!(cfg.session_ttl_minutes, 240);
    assert_eq!(cfg.default_start_time, "09:00");
    assert_eq!(cfg.default_finish_time, "18:00");
}

#[test]
fn policies_are_read_from_yaml() {
    let path = temp_out("config_policies", "conf");
    fs::write(
        &path,
        "database: jcr.sqlite\nempty_team_policy: reject\nteam_update_resolution: reresolve\ncreated_by: shift_lead\n",
    )
    .expect("write config");

    let cfg = Config::load_from(Path::new(&path)).expect("load");
    let policy = WorkflowPolicy::from(&cfg);
    assert_eq!(policy.empty_team, EmptyTeamPolicy::Reject);
    assert_eq!(policy.resolution, UpdateResolution::Reresolve);
    assert_eq!(policy.created_by, "shift_lead");
}

#[test]
fn invalid_values_are_rejected() {
    let path = temp_out("config_invalid", "conf");
    fs::write(
        &path,
        "database: jcr.sqlite\ndefault_finish_time: half past five\n",
    )
    .expect("write config");
    assert!(matches!(
        Config::load_from(Path::new(&path)),
        Err(AppError::Config(_))
    ));

    fs::write(&path, "database: jcr.sqlite\nsession_ttl_minutes: 0\n").expect("write config");
    assert!(matches!(
        Config::load_from(Path::new(&path)),
        Err(AppError::Config(_))
    ));

    fs::write(&path, "database: jcr.sqlite\nempty_team_policy: maybe\n").expect("write config");
    assert!(matches!(
        Config::load_from(Path::new(&path)),
        Err(AppError::Config(_))
    ));
}

#[test]
fn session_ttl_is_bounded() {
    let path = temp_out("config_ttl", "conf");
    fs::write(
        &path,
        "database: jcr.sqlite\nsession_ttl_minutes: 200000000000\n",
    )
    .expect("write config");
    assert!(matches!(
        Config::load_from(Path::new(&path)),
        Err(AppError::Config(_))
    ));

    fs::write(
        &path,
        format!("database: jcr.sqlite\nsession_ttl_minutes: {MAX_SESSION_TTL_MINUTES}\n"),
    )
    .expect("write config");
    let cfg = Config::load_from(Path::new(&path)).expect("largest ttl is accepted");
    assert_eq!(cfg.session_ttl_minutes, MAX_SESSION_TTL_MINUTES);
}

#[test]
fn absent_file_means_defaults() {
    let path = temp_out("config_absent", "conf");
    let cfg = Config::load_from(Path::new(&path)).expect("defaults");
    assert!(cfg.database.ends_with("jcr.sqlite"));
}
