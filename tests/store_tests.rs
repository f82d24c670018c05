use chrono::{Duration, Utc};
use jcrtracker::db::sessions;
use jcrtracker::db::stats;
use jcrtracker::db::store::{MatchPredicate, RecordStore, UpdateFields};
use jcrtracker::errors::AppError;
use jcrtracker::models::{SelectionMode, Status};
use jcrtracker::workflow::{Action, Engine, Flow, SessionContext, WorkflowPolicy, WorkflowSession};

mod common;
use common::{day, fixed_clock, hm, memory_store, team_form};

fn seed(store: &mut jcrtracker::db::store::SqliteStore, members: &[&str]) -> Vec<String> {
    let records = team_form("Paint", members, "X2")
        .target
        .expand(&common::fields("X2", 10), "2024-07-11 16:30:00", "tester");
    store.insert_many(&records).expect("insert");
    records.into_iter().map(|r| r.uid).collect()
}

#[test]
fn writes_invalidate_the_read_cache() {
    let mut store = memory_store();
    assert!(store.read_all().expect("read").is_empty());
    assert!(store.is_cached());

    seed(&mut store, &["B. Rossi"]);
    assert!(!store.is_cached());
    assert_eq!(store.read_all().expect("read").len(), 1);

    seed(&mut store, &["C. Wong"]);
    assert_eq!(store.read_all().expect("read").len(), 2);
}

#[test]
fn insert_of_nothing_writes_nothing() {
    let mut store = memory_store();
    assert_eq!(store.insert_many(&[]).expect("insert"), 0);
    assert!(store.read_all().expect("read").is_empty());
}

#[test]
fn duplicate_uid_rolls_back_the_whole_batch() {
    let mut store = memory_store();
    let mut records = team_form("Paint", &["B. Rossi", "C. Wong"], "X2")
        .target
        .expand(&common::fields("X2", 1), "2024-07-11 16:30:00", "tester");
    records[1].uid = records[0].uid.clone();

    let err = store.insert_many(&records).unwrap_err();
    assert!(matches!(err, AppError::ConstraintViolation(_)), "got {err:?}");
    assert!(store.read_all().expect("read").is_empty());
}

#[test]
fn snapshot_update_requires_every_uid() {
    let mut store = memory_store();
    let mut uids = seed(&mut store, &["B. Rossi", "C. Wong"]);
    uids.push("missing-uid".into());

    let fields = UpdateFields {
        finish_time: hm(12, 0),
        status: Status::OnHold,
        remarks: "waiting parts".into(),
    };
    let err = store
        .update_where(&MatchPredicate::Snapshot(uids), &fields)
        .unwrap_err();
    assert!(matches!(err, AppError::StaleSelection(_)));
    assert!(
        store
            .read_all()
            .expect("read")
            .iter()
            .all(|r| r.status == Status::ToBeStarted)
    );
}

#[test]
fn predicate_updates_only_the_named_members() {
    let mut store = memory_store();
    seed(&mut store, &["B. Rossi", "C. Wong", "D. Okafor"]);

    let fields = UpdateFields {
        finish_time: hm(16, 0),
        status: Status::WorkInProgress,
        remarks: String::new(),
    };
    let rows = store
        .update_where(
            &MatchPredicate::TeamDateMembers {
                team: "Paint".into(),
                date: day(12),
                members: vec!["C. Wong".into()],
            },
            &fields,
        )
        .expect("update");
    assert_eq!(rows, 1);

    let records = store.read_all().expect("read");
    for r in records {
        let expected = if r.employee_name == "C. Wong" {
            Status::WorkInProgress
        } else {
            Status::ToBeStarted
        };
        assert_eq!(r.status, expected, "{}", r.employee_name);
    }

    let none = store
        .update_where(&MatchPredicate::Uid("nope".into()), &fields)
        .expect("update");
    assert_eq!(none, 0);
}

#[test]
fn unparsable_rows_are_skipped_on_read() {
    let mut store = memory_store();
    seed(&mut store, &["B. Rossi"]);
    store
        .conn()
        .execute(
            "INSERT INTO jcr (Job_UID, Job_Created_At, Job_Created_By, Job_Date, Employee_Team,
                Employee_Name, Presence, Project, Phase_Space, Product, Part_Number, Part_Name,
                Task, Task_Q, Start_Time, Finish_Time, Status, Remarks)
             VALUES ('bad', '', '', 'not a date', 'Paint', 'E. Bad', 'Y', 'X2', '', '', '', '',
                '', 0, '09:00', '18:00', 'TBS', '')",
            [],
        )
        .expect("raw insert");
    store.invalidate();

    let records = store.read_all().expect("read");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee_name, "B. Rossi");
}

#[test]
fn writes_are_audited_in_the_log_table() {
    let mut store = memory_store();
    seed(&mut store, &["B. Rossi", "C. Wong"]);

    let ops: Vec<String> = {
        let mut stmt = store
            .conn()
            .prepare("SELECT operation FROM log WHERE operation = 'create'")
            .expect("prepare");
        stmt.query_map([], |row| row.get(0))
            .expect("query")
            .collect::<Result<_, _>>()
            .expect("rows")
    };
    assert_eq!(ops, ["create"]);
}

#[test]
fn db_info_counts_entries_and_dates() {
    let mut store = memory_store();
    seed(&mut store, &["B. Rossi", "C. Wong"]);

    let info = stats::collect(store.conn()).expect("stats");
    assert_eq!(info.entries, 2);
    assert_eq!(info.teams, 1);
    assert_eq!(info.employees, 2);
    assert_eq!(info.first_date, Some(day(12)));
    assert_eq!(info.last_date, Some(day(12)));
}

#[test]
fn sessions_survive_between_contexts() {
    let mut store = memory_store();

    let mut ctx = SessionContext::open(store.conn(), "alice", 240).expect("open");
    assert!(ctx.is_new);

    let out = Engine::new(&mut store, WorkflowPolicy::default())
        .with_clock(fixed_clock)
        .advance(&ctx.session, Action::Start(Flow::Update))
        .expect("start");
    ctx.store(store.conn(), out.session).expect("save");

    let reopened = SessionContext::open(store.conn(), "alice", 240).expect("reopen");
    assert!(!reopened.is_new);
    assert_eq!(reopened.session.active_flow(), Some(Flow::Update));

    // other ids are independent
    let other = SessionContext::open(store.conn(), "bob", 240).expect("open");
    assert!(other.is_new);
    assert_eq!(other.session, WorkflowSession::new());
}

#[test]
fn team_selection_round_trips_through_storage() {
    let mut store = memory_store();
    seed(&mut store, &["B. Rossi", "C. Wong"]);
    let policy = WorkflowPolicy::default();

    let mut session = WorkflowSession::new();
    for action in [
        Action::Start(Flow::Update),
        Action::ConfirmMode(SelectionMode::Team),
        Action::ChooseEntry(jcrtracker::workflow::EntryChoice::Team {
            team: "Paint".into(),
            date: day(12),
            members: vec!["B. Rossi".into()],
        }),
    ] {
        session = Engine::new(&mut store, policy.clone())
            .advance(&session, action)
            .expect("advance")
            .session;
    }

    sessions::save(store.conn(), "default", &session).expect("save");
    let loaded = sessions::load(store.conn(), "default")
        .expect("load")
        .expect("present");
    assert_eq!(loaded, session);
    assert_eq!(loaded.current_state().scratch.members, vec!["B. Rossi"]);
    assert_eq!(loaded.current_state().scratch.snapshot.len(), 1);
}

#[test]
fn idle_sessions_expire_after_the_ttl() {
    let store = memory_store();
    sessions::save(store.conn(), "old", &WorkflowSession::new()).expect("save");
    sessions::save(store.conn(), "fresh", &WorkflowSession::new()).expect("save");
    sessions::touch_at(store.conn(), "old", Utc::now() - Duration::minutes(300)).expect("touch");

    let ctx = SessionContext::open(store.conn(), "fresh", 240).expect("open");
    assert!(!ctx.is_new);

    assert!(sessions::load(store.conn(), "old").expect("load").is_none());
    let ids: Vec<String> = sessions::list(store.conn())
        .expect("list")
        .into_iter()
        .map(|(id, ..)| id)
        .collect();
    assert_eq!(ids, ["fresh"]);
}

#[test]
fn discarding_a_session_removes_it() {
    let store = memory_store();
    let mut ctx = SessionContext::open(store.conn(), "carol", 240).expect("open");
    ctx.store(store.conn(), WorkflowSession::new()).expect("save");

    assert!(ctx.discard(store.conn()).expect("discard"));
    assert!(sessions::load(store.conn(), "carol").expect("load").is_none());
}

#[test]
fn out_of_range_ttl_is_a_config_error() {
    let store = memory_store();
    sessions::save(store.conn(), "kept", &WorkflowSession::new()).expect("save");

    let err = sessions::purge_expired(store.conn(), 200_000_000_000).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(sessions::load(store.conn(), "kept").expect("load").is_some());
}
