use crate::cli::commands::{describe_step, open_store, run_actions};
use crate::cli::parser::{Cli, UpdateCmd};
use crate::config::Config;
use crate::db::store::{RecordStore, UpdateFields};
use crate::errors::{AppError, AppResult};
use crate::models::Status;
use crate::ui::messages::header;
use crate::utils::date::{self, format_job_date};
use crate::utils::time::time_or_default;
use crate::workflow::{Action, EntryChoice, Flow, candidates};

fn parse_date_arg(d: &str) -> AppResult<chrono::NaiveDate> {
    date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))
}

/// Progressive candidate listing: teams → dates → members, or employees → entries.
fn print_candidates(
    cfg: &Config,
    team: &Option<String>,
    date: &Option<String>,
    employee: &Option<String>,
) -> AppResult<()> {
    let mut store = open_store(cfg)?;
    let records = store.read_all()?;

    if let Some(name) = employee {
        let entries = candidates::entries_for_employee(records, name);
        if entries.is_empty() {
            println!("No entries for {}.", name);
        }
        for e in entries {
            println!("{}", e);
        }
        return Ok(());
    }

    match (team, date) {
        (None, _) => {
            println!("Teams:     {}", candidates::teams(records).join(", "));
            println!("Employees: {}", candidates::employees(records).join(", "));
        }
        (Some(t), None) => {
            let dates: Vec<String> = candidates::dates_for_team(records, t)
                .iter()
                .map(format_job_date)
                .collect();
            println!("Dates for {}: {}", t, dates.join(", "));
        }
        (Some(t), Some(d)) => {
            let d = parse_date_arg(d)?;
            let members = candidates::members_for(records, t, &d);
            println!(
                "Members of {} on {}: {}",
                t,
                format_job_date(&d),
                members.join(", ")
            );
        }
    }
    Ok(())
}

/// Handle the `update` subcommands.
pub fn handle(cli: &Cli, action: &UpdateCmd, cfg: &Config) -> AppResult<()> {
    let actions = match action {
        UpdateCmd::Start { mode } => {
            header("Update Existing Entry");
            let mut acts = vec![Action::Start(Flow::Update)];
            if let Some(m) = mode {
                acts.push(Action::ConfirmMode(*m));
            }
            acts
        }
        UpdateCmd::Mode { mode } => vec![Action::ConfirmMode(*mode)],
        UpdateCmd::Candidates {
            team,
            date,
            employee,
        } => return print_candidates(cfg, team, date, employee),
        UpdateCmd::Choose {
            team,
            date,
            members,
            uid,
        } => {
            let choice = match (uid, team, date) {
                (Some(uid), _, _) => EntryChoice::Individual { uid: uid.clone() },
                (None, Some(team), Some(d)) => EntryChoice::Team {
                    team: team.clone(),
                    date: parse_date_arg(d)?,
                    members: members.clone(),
                },
                _ => {
                    return Err(AppError::Validation(
                        "choose either --uid, or --team with --date".into(),
                    ));
                }
            };
            vec![Action::ChooseEntry(choice)]
        }
        UpdateCmd::Submit {
            finish,
            status,
            remarks,
        } => {
            let status = Status::from_code(status).ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid status '{}'. Use TBS, WIP, DONE or HOLD.",
                    status
                ))
            })?;
            vec![Action::SubmitUpdate(UpdateFields {
                finish_time: time_or_default(finish.as_ref(), &cfg.default_finish_time)?,
                status,
                remarks: remarks.clone(),
            })]
        }
        UpdateCmd::Back => vec![Action::Back],
    };

    let (mut store, ctx) = run_actions(cli, cfg, actions)?;
    describe_step(&mut store, &ctx, cfg)
}
