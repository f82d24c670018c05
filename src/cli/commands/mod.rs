//! Command handlers. The workflow commands share the helpers below to run
//! engine actions against the caller's session and to describe what the
//! next step expects.

pub mod config;
pub mod create;
pub mod db;
pub mod export;
pub mod init;
pub mod insights;
pub mod log;
pub mod session;
pub mod update;
pub mod view;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::store::{RecordStore, SqliteStore};
use crate::errors::AppResult;
use crate::models::SelectionMode;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::format_job_date;
use crate::utils::table::{Column, Table};
use crate::workflow::state::{Step, WorkflowSession};
use crate::workflow::{Action, Committed, Engine, Flow, SessionContext, WorkflowPolicy, candidates};

pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    SqliteStore::open(&cfg.database)
}

pub(crate) fn open_session(
    store: &SqliteStore,
    cli: &Cli,
    cfg: &Config,
) -> AppResult<SessionContext> {
    SessionContext::open(store.conn(), &cli.session, cfg.session_ttl_minutes)
}

/// Apply `actions` in order, persisting the session after each success.
/// Stops at the first failure, leaving the last good state stored.
pub(crate) fn run_actions(
    cli: &Cli,
    cfg: &Config,
    actions: Vec<Action>,
) -> AppResult<(SqliteStore, SessionContext)> {
    let mut store = open_store(cfg)?;
    let mut ctx = open_session(&store, cli, cfg)?;

    for action in actions {
        let outcome = {
            let mut engine = Engine::new(&mut store, WorkflowPolicy::from(cfg));
            engine.advance(&ctx.session, action)?
        };
        if let Err(e) = ctx.store(store.conn(), outcome.session) {
            if let Some(c) = &outcome.committed {
                tracing::error!(error = %e, committed = ?c, "session not saved after a committed write");
                report_commit(c);
                warning(
                    "The register change above is saved, but the session could not be. \
                     Check `jcr view` before submitting again.",
                );
            }
            return Err(e);
        }
        if let Some(c) = outcome.committed {
            report_commit(&c);
        }
    }

    Ok((store, ctx))
}

fn report_commit(c: &Committed) {
    match c {
        Committed::Inserted { uids } if uids.is_empty() => {
            warning("No team members selected: nothing was added.")
        }
        Committed::Inserted { uids } if uids.len() == 1 => {
            success(format!("Entry successfully added ({}).", uids[0]))
        }
        Committed::Inserted { uids } => success(format!(
            "{} entries successfully added to the register.",
            uids.len()
        )),
        Committed::Updated {
            mode: SelectionMode::Team,
            rows,
        } => success(format!("Updated {} entries successfully!", rows)),
        Committed::Updated {
            mode: SelectionMode::Individual,
            ..
        } => success("Entry updated successfully!"),
    }
}

fn list_line(label: &str, values: &[String]) {
    if values.is_empty() {
        println!("  {label}: (none yet)");
    } else {
        println!("  {label}: {}", values.join(", "));
    }
}

/// Print where the session stands and what the next command is.
pub(crate) fn describe_step(store: &mut SqliteStore, ctx: &SessionContext, cfg: &Config) -> AppResult<()> {
    let session: &WorkflowSession = &ctx.session;
    let view = session.current_state();

    match (view.flow, view.step) {
        (None, _) | (_, None) => {
            info("No active flow. Start one with `jcr create start` or `jcr update start`.");
        }
        (Some(flow), Some(Step::Select)) => {
            info(format!(
                "{} flow: choose Team or Individual with `jcr {} mode <team|individual>`.",
                if flow == Flow::Create { "Create" } else { "Update" },
                flow
            ));
        }
        (Some(_), Some(Step::FillInfo)) => {
            let records = store.read_all()?;
            info(format!(
                "Fill in the entry ({} mode) and submit with `jcr create submit`.",
                view.mode.map(|m| m.as_str()).unwrap_or("?")
            ));
            list_line("Teams", &candidates::teams(records));
            list_line("Employees", &candidates::employees(records));
            list_line("Projects", &candidates::projects(records));
            match view.mode {
                Some(SelectionMode::Team) => {
                    println!("  Use --team and one --member per person.");
                }
                _ => println!("  Use --team and --employee."),
            }
        }
        (Some(_), Some(Step::ChooseEntry)) => {
            let records = store.read_all()?;
            match view.mode {
                Some(SelectionMode::Team) => {
                    info("Choose team, date and members with `jcr update choose --team T --date D --member M`.");
                    list_line("Teams", &candidates::teams(records));
                }
                _ => {
                    info("Choose an entry with `jcr update choose --uid UID`.");
                    list_line("Employees", &candidates::employees(records));
                }
            }
            println!("  `jcr update candidates` narrows the choices.");
        }
        (Some(_), Some(Step::UpdateForm)) => {
            let records = store.read_all()?;
            let scratch = &view.scratch;
            let affected: Vec<_> = records
                .iter()
                .filter(|r| match &scratch.entry_id {
                    Some(uid) => r.uid == *uid,
                    None => scratch.snapshot.contains(&r.uid),
                })
                .collect();

            match (&scratch.team, &scratch.date, &scratch.entry_id) {
                (Some(team), Some(date), _) => info(format!(
                    "Updating entries for team: {} on date: {}",
                    team,
                    format_job_date(date)
                )),
                (_, _, Some(_)) => {
                    if let Some(r) = affected.first() {
                        info(format!(
                            "Updating entry for: {} on date: {}",
                            r.employee_name,
                            r.job_date_str()
                        ));
                    }
                }
                _ => {}
            }
            println!("Number of entries to update: {}", affected.len());

            let mut table = Table::new(vec![
                Column::new("Employee_Name", 24),
                Column::new("Job_Date", 10),
                Column::new("Project", 20),
                Column::new("Status", 6),
            ]);
            for r in &affected {
                table.add_row(vec![
                    r.employee_name.clone(),
                    r.job_date_str(),
                    r.project.clone(),
                    r.status.to_string(),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
            println!("Submit with `jcr update submit --finish HH:MM --status S --remarks TEXT`.");
        }
    }
    Ok(())
}
